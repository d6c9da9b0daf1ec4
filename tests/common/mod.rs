// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{Duration, Utc};
use ruri_dashboard_core::models::{Session, UserProfile};
use ruri_dashboard_core::session::{InMemoryStorage, SessionRepository};
use std::sync::Arc;

/// Install a test subscriber once; later calls are no-ops.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// In-memory repository plus a handle on its raw storage, for tests that
/// need to corrupt persisted state directly.
#[allow(dead_code)]
pub fn test_repo() -> (SessionRepository, Arc<InMemoryStorage>) {
    let storage = Arc::new(InMemoryStorage::new());
    (SessionRepository::new(storage.clone()), storage)
}

#[allow(dead_code)]
pub fn profile(has_access: bool) -> UserProfile {
    UserProfile {
        id: "326972644033".to_string(),
        username: "ruri_fan".to_string(),
        avatar: Some("a_1b2c3".to_string()),
        has_access,
    }
}

/// A session issued the given number of hours ago.
#[allow(dead_code)]
pub fn session_issued_hours_ago(hours: i64, has_access: bool) -> Session {
    Session {
        token: "opaque-token".to_string(),
        issued_at: Utc::now() - Duration::hours(hours),
        user: profile(has_access),
    }
}

/// A freshly issued session.
#[allow(dead_code)]
pub fn fresh_session(has_access: bool) -> Session {
    session_issued_hours_ago(0, has_access)
}
