// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access tier evaluation over the session repository.

use chrono::{DateTime, Utc};

use crate::models::UserProfile;
use crate::session::SessionRepository;

/// Coarse-grained permission level derived from persisted state.
/// Never persisted itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTier {
    /// No session and no public-access opt-in
    None,
    /// Public-access opt-in, or a session without dashboard access
    Public,
    /// Live session whose user has dashboard access
    Authenticated,
}

/// Result of one evaluation.
///
/// `session_present` reports whether a live (non-expired) session exists:
/// the route guard needs it to tell "not logged in" apart from "logged in
/// without access" when picking a redirect target. It never exposes raw
/// session fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierEvaluation {
    pub tier: AccessTier,
    pub session_present: bool,
    /// A session was found but has outlived its 24h lifetime
    pub expired: bool,
}

/// Computes the caller's access tier from repository state.
///
/// Stateless and cache-free: every call re-reads the repository.
#[derive(Clone)]
pub struct AccessEvaluator {
    repo: SessionRepository,
}

impl AccessEvaluator {
    pub fn new(repo: SessionRepository) -> Self {
        Self { repo }
    }

    /// Pure evaluation at an explicit instant. No side effects: an expired
    /// session is reported via `expired` but left in place.
    pub fn evaluate_at(&self, now: DateTime<Utc>) -> TierEvaluation {
        let public = self.repo.has_public_access();
        let fallback_tier = if public {
            AccessTier::Public
        } else {
            AccessTier::None
        };

        match self.repo.load() {
            Some(session) if session.is_expired_at(now) => TierEvaluation {
                tier: fallback_tier,
                session_present: false,
                expired: true,
            },
            Some(session) => {
                let tier = if session.user.has_access {
                    AccessTier::Authenticated
                } else {
                    fallback_tier
                };
                TierEvaluation {
                    tier,
                    session_present: true,
                    expired: false,
                }
            }
            None => TierEvaluation {
                tier: fallback_tier,
                session_present: false,
                expired: false,
            },
        }
    }

    /// Pure evaluation at the current instant.
    pub fn evaluate(&self) -> TierEvaluation {
        self.evaluate_at(Utc::now())
    }

    /// Evaluate and self-heal: an expired session is cleared from the
    /// repository (implicit logout).
    ///
    /// This is the one read in the core with a write side effect, and it is
    /// idempotent: re-evaluating an already-cleared state is a no-op.
    pub fn compute_at(&self, now: DateTime<Utc>) -> TierEvaluation {
        let evaluation = self.evaluate_at(now);
        if evaluation.expired {
            tracing::info!("Session expired, clearing");
            self.repo.clear();
        }
        evaluation
    }

    /// Self-healing evaluation at the current instant.
    pub fn compute(&self) -> TierEvaluation {
        self.compute_at(Utc::now())
    }

    /// Tier with expiry self-healing applied.
    pub fn compute_tier(&self) -> AccessTier {
        self.compute().tier
    }

    /// Current user profile, for UI display. Expiry is not judged here.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.repo.load().map(|s| s.user)
    }
}
