//! Session and user profile models.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Hours before a session is considered expired.
pub const SESSION_TTL_HOURS: i64 = 24;

/// User profile returned by the backend at token-exchange time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Discord user ID
    pub id: String,
    /// Discord username
    pub username: String,
    /// Avatar hash/URL, if the user has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Whether the user may see admin views. Set once by the backend when
    /// the code is exchanged, never recomputed client-side.
    #[serde(default)]
    pub has_access: bool,
}

/// An authenticated session.
///
/// Created only by the OAuth exchange on a successful code exchange and
/// owned by the session repository. A persisted session missing either the
/// token or the user profile is treated as absent, never partially valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque backend access token
    pub token: String,
    /// When the session was established
    pub issued_at: DateTime<Utc>,
    /// Profile captured at exchange time
    pub user: UserProfile,
}

impl Session {
    /// Whether the session has outlived its 24h lifetime at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.issued_at) > Duration::hours(SESSION_TTL_HOURS)
    }

    /// Whether the session is expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_issued(issued_at: DateTime<Utc>) -> Session {
        Session {
            token: "tok".to_string(),
            issued_at,
            user: UserProfile {
                id: "1".to_string(),
                username: "ruri".to_string(),
                avatar: None,
                has_access: true,
            },
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();

        let fresh = session_issued(now - Duration::hours(23));
        assert!(!fresh.is_expired_at(now));

        // Exactly 24h is still valid; the rule is strictly "older than"
        let on_boundary = session_issued(now - Duration::hours(24));
        assert!(!on_boundary.is_expired_at(now));

        let stale = session_issued(now - Duration::hours(25));
        assert!(stale.is_expired_at(now));
    }
}
