// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Metric snapshot models for the polling engine.
//!
//! One poll cycle fans out to six independent backend endpoints. Each
//! endpoint is optional: a failing one degrades its own group to `None` in
//! the merged snapshot without affecting the others.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The independent metric groups the dashboard polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricGroup {
    Stats,
    Activity,
    LifetimeStats,
    TopCommands,
    LanguageStats,
    Performance,
}

impl MetricGroup {
    /// All groups, in the order they are fetched.
    pub const ALL: [MetricGroup; 6] = [
        MetricGroup::Stats,
        MetricGroup::Activity,
        MetricGroup::LifetimeStats,
        MetricGroup::TopCommands,
        MetricGroup::LanguageStats,
        MetricGroup::Performance,
    ];

    /// Backend endpoint path for this group.
    pub fn endpoint(&self) -> &'static str {
        match self {
            MetricGroup::Stats => "/api/stats",
            MetricGroup::Activity => "/api/activity",
            MetricGroup::LifetimeStats => "/api/lifetime-stats",
            MetricGroup::TopCommands => "/api/top-commands",
            MetricGroup::LanguageStats => "/api/language-stats",
            MetricGroup::Performance => "/api/bot-performance",
        }
    }

    /// Stable field name, used in logs and by consumers keying off strings.
    pub fn name(&self) -> &'static str {
        match self {
            MetricGroup::Stats => "stats",
            MetricGroup::Activity => "activity",
            MetricGroup::LifetimeStats => "lifetime_stats",
            MetricGroup::TopCommands => "top_commands",
            MetricGroup::LanguageStats => "language_stats",
            MetricGroup::Performance => "performance",
        }
    }
}

impl fmt::Display for MetricGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The merged, possibly partial, result of one poll cycle.
///
/// `None` marks a group whose endpoint failed on the most recent poll. The
/// engine retains the previous snapshot only long enough to compute a diff;
/// no history is kept.
#[derive(Debug, Clone)]
pub struct MetricSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub fields: HashMap<MetricGroup, Option<Value>>,
}

impl MetricSnapshot {
    /// Value for a group, if its endpoint succeeded this cycle.
    pub fn get(&self, group: MetricGroup) -> Option<&Value> {
        self.fields.get(&group).and_then(|v| v.as_ref())
    }

    /// Groups whose endpoint failed this cycle.
    pub fn failed_groups(&self) -> Vec<MetricGroup> {
        MetricGroup::ALL
            .iter()
            .copied()
            .filter(|g| self.get(*g).is_none())
            .collect()
    }
}

/// One metric group's value plus its change flag.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricField {
    /// `None` when the group's endpoint failed this cycle
    pub value: Option<Value>,
    /// True when the value differs from the previous cycle's value. A
    /// group's first-ever observation is never marked changed.
    pub changed: bool,
}

/// Whether every endpoint in a cycle succeeded. Logging only: subscribers
/// always receive the best-effort merged snapshot either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Success,
    PartialFailure,
}

/// What subscribers receive after each poll cycle.
#[derive(Debug, Clone)]
pub struct SnapshotUpdate {
    pub fetched_at: DateTime<Utc>,
    pub fields: HashMap<MetricGroup, MetricField>,
    pub outcome: CycleOutcome,
}

impl SnapshotUpdate {
    pub fn value(&self, group: MetricGroup) -> Option<&Value> {
        self.fields.get(&group).and_then(|f| f.value.as_ref())
    }

    pub fn changed(&self, group: MetricGroup) -> bool {
        self.fields.get(&group).is_some_and(|f| f.changed)
    }
}
