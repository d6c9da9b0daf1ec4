// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation gating for tier-protected views.
//!
//! There are exactly two protected-route flavors; the guard never inspects
//! anything finer than the derived tier evaluation.

use crate::services::access::{AccessEvaluator, AccessTier};

/// What a protected route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRequirement {
    /// Dashboard views: public opt-in or any live authenticated session
    /// with access
    PublicOrAuthenticated,
    /// Admin views: a live session whose user has dashboard access
    AuthenticatedWithAccess,
}

/// Where a denied navigation is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    /// The login entry point
    Login,
    /// The "you are signed in but not allowed here" view
    Unauthorized,
}

impl RedirectTarget {
    /// Route path in the front end's route table.
    pub fn path(&self) -> &'static str {
        match self {
            RedirectTarget::Login => "/",
            RedirectTarget::Unauthorized => "/unauthorized",
        }
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(RedirectTarget),
}

/// Decides whether a navigation to a protected view proceeds.
#[derive(Clone)]
pub struct RouteGuard {
    evaluator: AccessEvaluator,
}

impl RouteGuard {
    pub fn new(evaluator: AccessEvaluator) -> Self {
        Self { evaluator }
    }

    /// Check a navigation against a requirement.
    ///
    /// Uses the self-healing evaluation, so an expired session is cleared
    /// the moment the visitor navigates anywhere protected.
    pub fn authorize(&self, requirement: AccessRequirement) -> RouteDecision {
        let evaluation = self.evaluator.compute();

        match requirement {
            AccessRequirement::AuthenticatedWithAccess => {
                if !evaluation.session_present {
                    RouteDecision::Redirect(RedirectTarget::Login)
                } else if evaluation.tier != AccessTier::Authenticated {
                    // Signed in, but the backend granted no dashboard access
                    RouteDecision::Redirect(RedirectTarget::Unauthorized)
                } else {
                    RouteDecision::Allow
                }
            }
            AccessRequirement::PublicOrAuthenticated => match evaluation.tier {
                AccessTier::None => RouteDecision::Redirect(RedirectTarget::Login),
                AccessTier::Public | AccessTier::Authenticated => RouteDecision::Allow,
            },
        }
    }
}
