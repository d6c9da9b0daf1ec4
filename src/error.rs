// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Core error types with user-facing message mapping.

/// Error type for the dashboard core.
///
/// Session expiry is deliberately not represented here: it is a silent
/// state transition handled by the access evaluator, not a failure. Metric
/// fetch failures likewise never surface as errors; they degrade individual
/// snapshot fields to `None` inside the polling engine.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No authorization code was supplied. Caller misuse; raised before any
    /// network call and never retried.
    #[error("Authorization code is missing")]
    MissingCode,

    /// The backend refused the authorization code. Carries the backend's
    /// `detail` message when one was present in the response body.
    #[error("Authentication rejected: {0}")]
    AuthRejected(String),

    /// Transport failure: the request never got a response.
    #[error("Backend unreachable: {0}")]
    NetworkUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl CoreError {
    /// Whether a manual retry by the user is reasonable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::NetworkUnavailable(_))
    }

    /// Message suitable for direct display in the UI.
    ///
    /// Rejection details are surfaced verbatim; transport failures get a
    /// generic connectivity message rather than the underlying I/O error.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::MissingCode => "No authorization code was provided.".to_string(),
            CoreError::AuthRejected(detail) => detail.clone(),
            CoreError::NetworkUnavailable(_) => {
                "No response from the server. Check your connection and try again.".to_string()
            }
            CoreError::Internal(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, CoreError>;
