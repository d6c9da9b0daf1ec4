// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the core's logic layer.

pub mod access;
pub mod guard;
pub mod oauth;
pub mod polling;

pub use access::{AccessEvaluator, AccessTier, TierEvaluation};
pub use guard::{AccessRequirement, RedirectTarget, RouteDecision, RouteGuard};
pub use oauth::AuthClient;
pub use polling::{HttpMetricSource, MetricSource, PollingSync, Subscription};
