/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/10/26
******************************************************************************/

//! Authentication module for the Preservica APIs
//!
//! This module owns the login exchange and the bearer token it produces:
//! - Username/password (and optional tenant) login against the access token endpoint
//! - Lazy login on first use
//! - Explicit token refresh, used by the request executor after a 401

use crate::application::config::Credentials;
use crate::constants::{LOGIN_PATH, MAX_TOKEN_VALIDITY_MINUTES};
use crate::error::AppError;
use crate::model::auth::LoginResponse;
use crate::model::http::send_request;
use crate::model::requests::{ApiRequest, Payload, ResponseFormat};
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Session information for authenticated requests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Bearer token sent in the access token header
    pub token: String,
    /// Refresh token handed out with the access token
    pub refresh_token: Option<String>,
    /// Authenticated user
    pub user: Option<String>,
    /// Tenant of the authenticated user
    pub tenant: Option<String>,
    /// Server version reported at login
    pub version: Option<String>,
    /// Roles granted to the user
    pub roles: Vec<String>,
    /// Token lifetime in minutes
    pub valid_for_minutes: i64,
    /// When the token was obtained
    pub issued_at: DateTime<Utc>,
}

impl Session {
    /// Instant at which the token stops being valid
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        let minutes = self.valid_for_minutes.clamp(0, MAX_TOKEN_VALIDITY_MINUTES);
        self.issued_at + Duration::minutes(minutes)
    }

    /// Checks if the token is expired or will expire soon
    ///
    /// # Arguments
    /// * `margin_seconds` - Safety margin in seconds (default: 60 = 1 minute)
    #[must_use]
    pub fn is_expired(&self, margin_seconds: Option<i64>) -> bool {
        let margin = Duration::seconds(margin_seconds.unwrap_or(60));
        Utc::now() + margin >= self.expires_at()
    }

    /// Seconds until the token expires; negative once expired
    #[must_use]
    pub fn seconds_until_expiry(&self) -> i64 {
        (self.expires_at() - Utc::now()).num_seconds()
    }
}

/// Authentication manager
///
/// Holds the resolved credentials and the current [`Session`]. The token is the
/// only mutable state and is replaced whole on every login.
pub struct Auth {
    credentials: Arc<Credentials>,
    client: Client,
    session: RwLock<Option<Session>>,
}

impl Auth {
    /// Creates a new Auth instance sharing the caller's HTTP transport
    pub fn new(credentials: Arc<Credentials>, client: Client) -> Self {
        Self {
            credentials,
            client,
            session: RwLock::new(None),
        }
    }

    /// Credentials used for the login exchange
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Gets the current session, logging in when there is none or it has expired
    pub async fn get_session(&self) -> Result<Session, AppError> {
        let session = self.session.read().await;

        if let Some(sess) = session.as_ref() {
            if !sess.is_expired(Some(30)) {
                return Ok(sess.clone());
            }
            debug!("Access token expired, logging in again");
        } else {
            info!("No active session, logging in");
        }
        drop(session);

        self.login().await
    }

    /// Current bearer token, logging in first if needed
    pub async fn token(&self) -> Result<String, AppError> {
        Ok(self.get_session().await?.token)
    }

    /// Session currently held, without any network call
    pub async fn current_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Performs the login exchange and stores the new session
    ///
    /// # Errors
    /// * `AppError::Authentication` if the server rejects the credentials
    /// * `AppError::RequestFailed` for any other non-success status
    /// * `AppError::Http` if the server cannot be reached
    pub async fn login(&self) -> Result<Session, AppError> {
        let url = format!("{}/{}", self.credentials.base_url(), LOGIN_PATH);

        let mut form = vec![
            ("username".to_string(), self.credentials.username.clone()),
            ("password".to_string(), self.credentials.password.clone()),
        ];
        if let Some(tenant) = &self.credentials.tenant {
            form.push(("tenant".to_string(), tenant.clone()));
        }
        let request = ApiRequest::post(LOGIN_PATH)
            .payload(Payload::Form(form))
            .accept(ResponseFormat::Json);

        debug!("Sending login request to: {}", url);
        let response = send_request(&self.client, &request, &url, None).await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = response.text().await.unwrap_or_default();
            error!("Login rejected with status {}: {}", status, message);
            return Err(AppError::Authentication { status, message });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Login failed with status {}: {}", status, body);
            return Err(AppError::RequestFailed { status, url, body });
        }

        let body: LoginResponse = response.json().await?;
        let session = body.into_session().ok_or_else(|| {
            error!("Login response carried no token");
            AppError::Authentication {
                status,
                message: "login response carried no token".to_string(),
            }
        })?;

        let mut sess = self.session.write().await;
        *sess = Some(session.clone());

        info!(
            "✓ Login successful, user: {}",
            session.user.as_deref().unwrap_or(&self.credentials.username)
        );
        Ok(session)
    }

    /// Replaces the token with a fresh one from the login exchange
    ///
    /// # Returns
    /// * `Ok(String)` - The new bearer token
    pub async fn refresh(&self) -> Result<String, AppError> {
        warn!("Refreshing access token");
        Ok(self.login().await?.token)
    }

    /// Forgets the current session; the next call logs in again
    pub async fn logout(&self) {
        info!("Logging out");
        let mut session = self.session.write().await;
        *session = None;
    }
}
