// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ruri dashboard core: session, access control, and live metric sync.
//!
//! This crate is the non-presentational core of the Ruri bot-monitoring
//! dashboard client. It decides what a visitor may see (session state,
//! public-access opt-in, route gating) and keeps dashboard metrics live
//! (polling fan-out with per-endpoint failure isolation and change flags).
//! Rendering, routing tables, and styling are the host application's job.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;

use std::sync::Arc;

use config::Config;
use services::{AccessEvaluator, AuthClient, HttpMetricSource, PollingSync, RouteGuard};
use session::{SessionRepository, StorageBackend};

/// One-stop wiring for a host application.
///
/// Holds the configuration and the shared session repository, and hands out
/// the components built on them. Everything it returns shares the same
/// storage, so a login observed through [`auth`] is immediately visible to
/// [`guard`].
///
/// [`auth`]: DashboardClient::auth
/// [`guard`]: DashboardClient::guard
pub struct DashboardClient {
    config: Config,
    repo: SessionRepository,
    auth: AuthClient,
}

impl DashboardClient {
    pub fn new(config: Config, storage: Arc<dyn StorageBackend>) -> Self {
        let repo = SessionRepository::new(storage);
        let auth = AuthClient::new(&config, repo.clone());
        Self { config, repo, auth }
    }

    /// Client over an in-memory store, for tests and tooling.
    pub fn in_memory(config: Config) -> Self {
        Self::new(config, Arc::new(session::InMemoryStorage::new()))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn repository(&self) -> &SessionRepository {
        &self.repo
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    pub fn evaluator(&self) -> AccessEvaluator {
        AccessEvaluator::new(self.repo.clone())
    }

    pub fn guard(&self) -> RouteGuard {
        RouteGuard::new(self.evaluator())
    }

    /// Polling engine against the configured backend.
    pub fn polling(&self) -> PollingSync<HttpMetricSource> {
        PollingSync::with_period(
            HttpMetricSource::new(&self.config.api_url),
            self.config.poll_interval,
        )
    }
}
