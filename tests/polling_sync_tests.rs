// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

mod common;

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use futures_util::future::BoxFuture;
use ruri_dashboard_core::models::{CycleOutcome, MetricGroup};
use ruri_dashboard_core::services::{MetricSource, PollingSync};
use serde_json::{json, Value};

/// Deterministic metric source: `script(group, cycle)` returns the value
/// for that group on that cycle, or `None` to simulate a failed endpoint.
struct ScriptedSource {
    counts: Arc<DashMap<MetricGroup, usize>>,
    script: fn(MetricGroup, usize) -> Option<Value>,
    delay: Duration,
}

impl ScriptedSource {
    fn new(script: fn(MetricGroup, usize) -> Option<Value>) -> Self {
        Self::with_delay(script, Duration::ZERO)
    }

    fn with_delay(script: fn(MetricGroup, usize) -> Option<Value>, delay: Duration) -> Self {
        Self {
            counts: Arc::new(DashMap::new()),
            script,
            delay,
        }
    }

    /// Handle onto the per-group fetch counters, usable after the source
    /// has been handed to the engine.
    fn counters(&self) -> Arc<DashMap<MetricGroup, usize>> {
        self.counts.clone()
    }
}

impl MetricSource for ScriptedSource {
    fn fetch(&self, group: MetricGroup) -> BoxFuture<'_, anyhow::Result<Value>> {
        Box::pin(async move {
            let cycle = {
                let mut entry = self.counts.entry(group).or_insert(0);
                let cycle = *entry;
                *entry += 1;
                cycle
            };
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            (self.script)(group, cycle)
                .ok_or_else(|| anyhow::anyhow!("scripted failure for {group}"))
        })
    }
}

const PERIOD: Duration = Duration::from_secs(5);

#[tokio::test(start_paused = true)]
async fn test_partial_failure_degrades_only_failed_groups() {
    common::init_tracing();
    let source = ScriptedSource::new(|group, _| match group {
        MetricGroup::Activity | MetricGroup::Performance => None,
        _ => Some(json!({"ok": true})),
    });

    let sync = PollingSync::with_period(source, PERIOD);
    let mut sub = sync.start();

    let update = sub.recv().await.expect("first cycle publishes");
    sub.stop();

    let populated = update.fields.values().filter(|f| f.value.is_some()).count();
    assert_eq!(populated, 4);
    assert!(update.value(MetricGroup::Activity).is_none());
    assert!(update.value(MetricGroup::Performance).is_none());
    assert!(update.value(MetricGroup::Stats).is_some());
    assert_eq!(update.outcome, CycleOutcome::PartialFailure);
}

#[tokio::test(start_paused = true)]
async fn test_change_flags_track_value_movement() {
    let source = ScriptedSource::new(|group, cycle| match group {
        // Moves every cycle
        MetricGroup::Stats => Some(json!({"messages": cycle})),
        // Never moves
        _ => Some(json!("steady")),
    });

    let sync = PollingSync::with_period(source, PERIOD);
    let mut sub = sync.start();

    let first = sub.recv().await.expect("cycle 0");
    // First-ever observation is never marked changed
    assert!(MetricGroup::ALL.iter().all(|&g| !first.changed(g)));
    assert_eq!(first.outcome, CycleOutcome::Success);

    let second = sub.recv().await.expect("cycle 1");
    sub.stop();

    assert!(second.changed(MetricGroup::Stats));
    assert!(!second.changed(MetricGroup::Activity));
    assert!(!second.changed(MetricGroup::LanguageStats));
}

#[tokio::test(start_paused = true)]
async fn test_recovery_from_failure_is_not_a_change() {
    let source = ScriptedSource::new(|group, cycle| match (group, cycle) {
        (MetricGroup::LanguageStats, 0) => None,
        (MetricGroup::LanguageStats, _) => Some(json!({"rust": 100})),
        _ => Some(json!(1)),
    });

    let sync = PollingSync::with_period(source, PERIOD);
    let mut sub = sync.start();

    let first = sub.recv().await.expect("cycle 0");
    assert!(first.value(MetricGroup::LanguageStats).is_none());

    let second = sub.recv().await.expect("cycle 1");
    sub.stop();

    // The group's first appearance: present, but not flagged
    assert!(second.value(MetricGroup::LanguageStats).is_some());
    assert!(!second.changed(MetricGroup::LanguageStats));
    assert_eq!(second.outcome, CycleOutcome::Success);
}

#[tokio::test(start_paused = true)]
async fn test_stop_halts_emissions() {
    let source = ScriptedSource::new(|_, cycle| Some(json!(cycle)));
    let sync = PollingSync::with_period(source, PERIOD);
    let mut sub = sync.start();

    sub.recv().await.expect("first cycle");
    sub.stop();

    // Advance well past several scheduled ticks
    tokio::time::advance(Duration::from_secs(60)).await;
    tokio::task::yield_now().await;

    assert!(sub.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_stop_is_idempotent() {
    let source = ScriptedSource::new(|_, _| Some(json!(1)));
    let sync = PollingSync::with_period(source, PERIOD);
    let mut sub = sync.start();

    sub.recv().await.expect("first cycle");
    sub.stop();
    sub.stop();

    assert!(sub.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_cycles_never_overlap_with_slow_endpoints() {
    // Each fetch takes twice the poll period; the scheduler must still run
    // strictly one cycle at a time, re-arming only after publication.
    let source = ScriptedSource::with_delay(|_, _| Some(json!(1)), Duration::from_secs(10));
    let counters = source.counters();
    let sync = PollingSync::with_period(source, PERIOD);
    let mut sub = sync.start();

    let first = sub.recv().await.expect("cycle 0");
    let second = sub.recv().await.expect("cycle 1");
    sub.stop();

    assert!(second.fetched_at > first.fetched_at);
    // Two published cycles means exactly two fetches per group; an
    // overlapping cycle would have started extra ones
    for group in MetricGroup::ALL {
        assert_eq!(counters.get(&group).map(|c| *c), Some(2), "{group}");
    }
}
