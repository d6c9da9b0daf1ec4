// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the dashboard core.

pub mod metrics;
pub mod session;

pub use metrics::{CycleOutcome, MetricField, MetricGroup, MetricSnapshot, SnapshotUpdate};
pub use session::{Session, UserProfile, SESSION_TTL_HOURS};
