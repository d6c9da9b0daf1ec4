// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session persistence layer.
//!
//! [`StorageBackend`] is the raw string key/value store (the browser
//! localStorage equivalent); [`SessionRepository`] is the typed facade the
//! rest of the core talks to. All operations are synchronous and total:
//! they never fail, and malformed persisted data is treated as absent and
//! transparently cleared.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::InMemoryStorage;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Session, UserProfile};

/// Storage keys as constants.
pub mod keys {
    pub const TOKEN: &str = "ruri_discord_token";
    pub const USER: &str = "ruri_user_data";
    pub const PUBLIC_ACCESS: &str = "ruri_public_access";
}

/// Raw durable key/value persistence.
///
/// Every mutation must be immediately durable and observable by any other
/// reader in the same process on its next read; implementations keep no
/// caching layer.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Persisted shape of the token entry. The issue timestamp lives with the
/// token so expiry can be judged without touching the profile entry.
#[derive(Serialize, Deserialize)]
struct StoredToken {
    token: String,
    issued_at: DateTime<Utc>,
}

/// Typed repository over a [`StorageBackend`].
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct SessionRepository {
    storage: Arc<dyn StorageBackend>,
}

impl SessionRepository {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Repository over a fresh in-memory store, for tests and tooling.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStorage::new()))
    }

    /// Persist a session. The single write path is the OAuth exchange.
    pub fn save(&self, session: &Session) {
        let stored = StoredToken {
            token: session.token.clone(),
            issued_at: session.issued_at,
        };
        // Plain structs; serialization cannot fail. An empty fallback would
        // parse as malformed and self-clear on the next load.
        let token_json = serde_json::to_string(&stored).unwrap_or_default();
        let user_json = serde_json::to_string(&session.user).unwrap_or_default();
        self.storage.set(keys::TOKEN, &token_json);
        self.storage.set(keys::USER, &user_json);
    }

    /// Load the current session, if one is fully present and well formed.
    ///
    /// A partially present or unparsable session is cleared and reported
    /// absent. Expiry is not judged here; that is the access evaluator's
    /// concern.
    pub fn load(&self) -> Option<Session> {
        let token_raw = self.storage.get(keys::TOKEN);
        let user_raw = self.storage.get(keys::USER);

        let parsed = match (token_raw, user_raw) {
            (Some(t), Some(u)) => serde_json::from_str::<StoredToken>(&t)
                .ok()
                .zip(serde_json::from_str::<UserProfile>(&u).ok()),
            (None, None) => return None,
            // One key without the other is never valid
            _ => None,
        };

        match parsed {
            Some((stored, user)) => Some(Session {
                token: stored.token,
                issued_at: stored.issued_at,
                user,
            }),
            None => {
                tracing::warn!("Malformed persisted session, clearing");
                self.clear();
                None
            }
        }
    }

    /// Remove the session. Leaves the public-access flag alone; that flag
    /// is independent of any session.
    pub fn clear(&self) {
        self.storage.remove(keys::TOKEN);
        self.storage.remove(keys::USER);
    }

    pub fn set_public_access(&self, enabled: bool) {
        if enabled {
            self.storage.set(keys::PUBLIC_ACCESS, "true");
        } else {
            self.storage.remove(keys::PUBLIC_ACCESS);
        }
    }

    pub fn has_public_access(&self) -> bool {
        self.storage
            .get(keys::PUBLIC_ACCESS)
            .is_some_and(|v| v == "true")
    }
}
