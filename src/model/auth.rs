/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/10/26
******************************************************************************/
use crate::application::auth::Session;
use crate::constants::{DEFAULT_TOKEN_VALIDITY_MINUTES, MAX_TOKEN_VALIDITY_MINUTES};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Body returned by the access token endpoint
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoginResponse {
    /// False when the server refused the credentials
    #[serde(default)]
    pub success: bool,
    /// Bearer token for subsequent calls
    #[serde(default)]
    pub token: Option<String>,
    /// Token lifetime in minutes
    #[serde(rename = "validFor", default)]
    pub valid_for: Option<i64>,
    /// Token that can be exchanged for a new access token
    #[serde(rename = "refresh-token", default)]
    pub refresh_token: Option<String>,
    /// Name of the authenticated user
    #[serde(default)]
    pub user: Option<String>,
    /// Tenant the user belongs to
    #[serde(default)]
    pub tenant: Option<String>,
    /// Server version string
    #[serde(default)]
    pub version: Option<String>,
    /// Roles granted to the user
    #[serde(default)]
    pub roles: Vec<String>,
}

impl LoginResponse {
    /// Converts the response into a session starting now
    ///
    /// Returns None when the server did not hand out a token.
    #[must_use]
    pub fn into_session(self) -> Option<Session> {
        let token = self.token.filter(|t| !t.is_empty())?;
        Some(Session {
            token,
            refresh_token: self.refresh_token,
            user: self.user,
            tenant: self.tenant,
            version: self.version,
            roles: self.roles,
            valid_for_minutes: self
                .valid_for
                .filter(|v| *v > 0)
                .map(|v| v.min(MAX_TOKEN_VALIDITY_MINUTES))
                .unwrap_or(DEFAULT_TOKEN_VALIDITY_MINUTES),
            issued_at: Utc::now(),
        })
    }
}
