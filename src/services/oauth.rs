// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Discord OAuth exchange against the dashboard backend.
//!
//! Handles:
//! - Building the Discord authorization URL
//! - Exchanging an authorization code for a session (`POST /auth/token`)
//! - Best-effort server logout (`GET /auth/logout`)
//!
//! This is the single write path that creates a [`Session`]; no other
//! component constructs one.

use chrono::Utc;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{CoreError, Result};
use crate::models::{Session, UserProfile};
use crate::session::SessionRepository;

const DISCORD_AUTHORIZE_URL: &str = "https://discord.com/api/oauth2/authorize";
const OAUTH_SCOPE: &str = "identify guilds";

/// OAuth client for the dashboard backend.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    api_url: String,
    client_id: String,
    repo: SessionRepository,
}

/// Successful token-exchange response body.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: UserProfile,
}

/// Error body shape the backend uses for rejections.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl AuthClient {
    pub fn new(config: &Config, repo: SessionRepository) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            client_id: config.discord_client_id.clone(),
            repo,
        }
    }

    /// Discord authorization URL for the login button.
    ///
    /// The callback lands on `{origin}/auth/callback`, where the front end
    /// picks the `code` query parameter out and calls [`authenticate`].
    ///
    /// [`authenticate`]: AuthClient::authenticate
    pub fn authorize_url(&self, origin: &str) -> String {
        let redirect_uri = format!("{}/auth/callback", origin.trim_end_matches('/'));
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}",
            DISCORD_AUTHORIZE_URL,
            self.client_id,
            urlencoding::encode(&redirect_uri),
            urlencoding::encode(OAUTH_SCOPE),
        )
    }

    /// Exchange an authorization code for a session.
    ///
    /// On success the session is persisted in the repository and returned.
    /// Failure taxonomy: an empty `code` is [`CoreError::MissingCode`]
    /// before any network call; a response with non-success status is
    /// [`CoreError::AuthRejected`] carrying the backend's `detail` when
    /// present; no response at all is [`CoreError::NetworkUnavailable`].
    pub async fn authenticate(&self, code: &str, redirect_uri: &str) -> Result<Session> {
        if code.trim().is_empty() {
            return Err(CoreError::MissingCode);
        }

        let url = format!("{}/auth/token", self.api_url);
        let body = serde_json::json!({
            "code": code,
            "redirect_uri": redirect_uri,
        });

        tracing::info!("Exchanging authorization code for session token");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CoreError::NetworkUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.detail)
                .unwrap_or_else(|| format!("Authentication failed (HTTP {})", status));
            tracing::warn!(%status, detail = %detail, "Token exchange rejected");
            return Err(CoreError::AuthRejected(detail));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Malformed token response: {}", e))?;

        let session = Session {
            token: token.access_token,
            issued_at: Utc::now(),
            user: token.user,
        };
        self.repo.save(&session);

        tracing::info!(
            username = %session.user.username,
            has_access = session.user.has_access,
            "Session established"
        );

        Ok(session)
    }

    /// Log out: tell the server, then clear local state regardless.
    ///
    /// The server call is best-effort; local state wins. Clears the session
    /// and the public-access flag, so the next evaluation lands on tier
    /// `None`.
    pub async fn logout(&self) {
        let url = format!("{}/auth/logout", self.api_url);
        match self.http.get(&url).send().await {
            Ok(response) => {
                tracing::debug!(status = %response.status(), "Server logout call completed")
            }
            Err(e) => {
                tracing::warn!(error = %e, "Server logout call failed, clearing local session anyway")
            }
        }

        self.repo.clear();
        self.repo.set_public_access(false);
        tracing::info!("Local session cleared");
    }
}
