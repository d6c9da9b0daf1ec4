// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Polling metric synchronization.
//!
//! Each subscription runs one task that repeatedly fans out a fetch to
//! every metric endpoint, merges whatever settled into a snapshot, diffs it
//! against the previous cycle, and publishes the result. Endpoints fail
//! independently: a failed fetch degrades its own group to `None`, never
//! the cycle.
//!
//! Ordering: cycle k+1 never begins before cycle k has been merged and
//! published; the timer is re-armed only after publication, so cycles never
//! overlap and concurrent fetches stay bounded at one fan-out. There is no
//! per-request timeout: an endpoint that never settles stalls that
//! subscription's cadence (accepted limitation).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures_util::future::{join_all, BoxFuture};
use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::DEFAULT_POLL_INTERVAL;
use crate::models::{CycleOutcome, MetricField, MetricGroup, MetricSnapshot, SnapshotUpdate};

/// Transport seam for metric fetches.
///
/// A failure is per-group: the engine swallows it, logs at warn, and the
/// group's field is `None` for that cycle.
pub trait MetricSource: Send + Sync {
    fn fetch(&self, group: MetricGroup) -> BoxFuture<'_, anyhow::Result<Value>>;
}

/// Fetches metric groups from the dashboard backend over HTTP.
#[derive(Clone)]
pub struct HttpMetricSource {
    http: reqwest::Client,
    api_url: String,
}

impl HttpMetricSource {
    pub fn new(api_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }
}

impl MetricSource for HttpMetricSource {
    fn fetch(&self, group: MetricGroup) -> BoxFuture<'_, anyhow::Result<Value>> {
        Box::pin(async move {
            let url = format!("{}{}", self.api_url, group.endpoint());
            let response = self.http.get(&url).send().await?;
            anyhow::ensure!(
                response.status().is_success(),
                "HTTP {} from {}",
                response.status(),
                group.endpoint()
            );
            Ok(response.json().await?)
        })
    }
}

/// Polling engine over a [`MetricSource`].
pub struct PollingSync<S> {
    source: Arc<S>,
    period: Duration,
}

impl<S: MetricSource + 'static> PollingSync<S> {
    /// Engine with the default 5s period.
    pub fn new(source: S) -> Self {
        Self::with_period(source, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_period(source: S, period: Duration) -> Self {
        Self {
            source: Arc::new(source),
            period,
        }
    }

    /// Start a subscription. The first poll fires immediately; subsequent
    /// cycles follow the configured period, measured from publication.
    pub fn start(&self) -> Subscription {
        let (update_tx, update_rx) = mpsc::channel(1);
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(run_loop(
            Arc::clone(&self.source),
            self.period,
            update_tx,
            stop_rx,
        ));
        Subscription {
            updates: update_rx,
            stop: stop_tx,
            task,
        }
    }
}

/// Handle to one active subscription.
///
/// Dropping the handle stops the engine; [`Subscription::stop`] does so
/// with the guarantee that nothing is emitted after it returns.
pub struct Subscription {
    updates: mpsc::Receiver<SnapshotUpdate>,
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Receive the next published update. Returns `None` once stopped.
    pub async fn recv(&mut self) -> Option<SnapshotUpdate> {
        self.updates.recv().await
    }

    /// Stop the subscription.
    ///
    /// Safe to call repeatedly, including from the consumer loop handling
    /// the very cycle being cancelled. After this returns, the update
    /// channel is closed and drained: no further update can be observed,
    /// even from a cycle already in flight.
    pub fn stop(&mut self) {
        let _ = self.stop.send(true);
        self.updates.close();
        while self.updates.try_recv().is_ok() {}
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let _ = self.stop.send(true);
        // A never-settling fetch would otherwise pin the task forever
        self.task.abort();
    }
}

async fn run_loop<S: MetricSource>(
    source: Arc<S>,
    period: Duration,
    updates: mpsc::Sender<SnapshotUpdate>,
    mut stop: watch::Receiver<bool>,
) {
    let mut prior: Option<MetricSnapshot> = None;

    loop {
        if *stop.borrow() {
            break;
        }

        let snapshot = poll_once(source.as_ref()).await;
        let update = diff_snapshots(prior.as_ref(), &snapshot);

        match update.outcome {
            CycleOutcome::PartialFailure => {
                tracing::warn!(failed = ?snapshot.failed_groups(), "Poll cycle completed with failures")
            }
            CycleOutcome::Success => tracing::debug!("Poll cycle completed"),
        }

        // Publication. A closed channel means the subscriber stopped.
        if updates.send(update).await.is_err() {
            break;
        }
        prior = Some(snapshot);

        // Re-arm only after publication so cycles never overlap
        tokio::select! {
            _ = stop.changed() => {
                if *stop.borrow() {
                    break;
                }
            }
            _ = tokio::time::sleep(period) => {}
        }
    }

    tracing::debug!("Polling subscription stopped");
}

/// One fan-out-and-merge round: every group fetched concurrently, each
/// settling independently.
async fn poll_once<S: MetricSource + ?Sized>(source: &S) -> MetricSnapshot {
    let fetches = MetricGroup::ALL.iter().map(|&group| async move {
        match source.fetch(group).await {
            Ok(value) => (group, Some(value)),
            Err(e) => {
                tracing::warn!(group = %group, error = %e, "Metric fetch failed");
                (group, None)
            }
        }
    });

    let fields: HashMap<_, _> = join_all(fetches).await.into_iter().collect();

    MetricSnapshot {
        fetched_at: Utc::now(),
        fields,
    }
}

/// Compare a fresh snapshot against the prior cycle's.
///
/// A group is `changed` only when both cycles produced a value and the
/// values differ (`serde_json::Value` equality, i.e. the serialized form
/// for composites). First observations and failure transitions are never
/// marked changed, so UI highlights fire only on genuine value movement.
fn diff_snapshots(prior: Option<&MetricSnapshot>, next: &MetricSnapshot) -> SnapshotUpdate {
    let fields = MetricGroup::ALL
        .iter()
        .map(|&group| {
            let value = next.get(group).cloned();
            let changed = match (prior.and_then(|p| p.get(group)), value.as_ref()) {
                (Some(old), Some(new)) => old != new,
                _ => false,
            };
            (group, MetricField { value, changed })
        })
        .collect();

    let outcome = if next.failed_groups().is_empty() {
        CycleOutcome::Success
    } else {
        CycleOutcome::PartialFailure
    };

    SnapshotUpdate {
        fetched_at: next.fetched_at,
        fields,
        outcome,
    }
}
