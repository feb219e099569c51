/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/10/26
******************************************************************************/

//! Client for the Preservica APIs
//!
//! This module provides the entry point that handles:
//! - Credential resolution (arguments, environment, credentials file)
//! - Login and transparent token refresh
//! - The entity, content and process monitor APIs through their service traits
//!
//! # Example
//! ```ignore
//! use preservica_client::prelude::*;
//! use futures::TryStreamExt;
//!
//! let client = Client::from_env().await?;
//! let folders: Vec<EntityRef> = client.children(None).try_collect().await?;
//! ```

use crate::application::auth::Session;
use crate::application::config::{Config, CredentialOverrides};
use crate::application::interfaces::entity::EntityService;
use crate::error::AppError;
use crate::model::entity::ProgressStatus;
use crate::model::http::HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Client for the Preservica APIs with automatic authentication
///
/// Implements [`EntityService`](crate::application::interfaces::entity::EntityService),
/// [`ContentService`](crate::application::interfaces::content::ContentService) and
/// [`MonitorService`](crate::application::interfaces::monitor::MonitorService).
/// Instances share no state; run one per thread or task if you need parallelism.
pub struct Client {
    http_client: Arc<HttpClient>,
    config: Arc<Config>,
}

impl Client {
    /// Creates a new client and performs the initial login
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let http_client = HttpClient::new(&config).await?;
        Ok(Self {
            http_client: Arc::new(http_client),
            config: Arc::new(config),
        })
    }

    /// Creates a new client without logging in; the first request does it
    pub fn new_lazy(config: Config) -> Result<Self, AppError> {
        let http_client = HttpClient::new_lazy(&config)?;
        Ok(Self {
            http_client: Arc::new(http_client),
            config: Arc::new(config),
        })
    }

    /// Resolves credentials with the given explicit values, then logs in
    pub async fn connect(overrides: &CredentialOverrides) -> Result<Self, AppError> {
        Self::new(Config::new(overrides)?).await
    }

    /// Resolves credentials from environment and credentials file, then logs in
    pub async fn from_env() -> Result<Self, AppError> {
        Self::new(Config::from_env()?).await
    }

    /// Authenticated executor used by the services
    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Page size used by the lazy listings
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.config.http.page_size.max(1)
    }

    /// Gets the current session, logging in if needed
    pub async fn get_session(&self) -> Result<Session, AppError> {
        self.http_client.auth().get_session().await
    }

    /// Drops the current session; the next call logs in again
    pub async fn logout(&self) {
        self.http_client.auth().logout().await;
    }

    /// Polls a progress token until the operation completes or fails
    ///
    /// # Arguments
    /// * `progress_token` - Token returned when the operation was started
    /// * `interval` - Pause between two polls
    /// * `max_polls` - Give up after this many polls (None = no limit)
    pub async fn wait_for_progress(
        &self,
        progress_token: &str,
        interval: Duration,
        max_polls: Option<u32>,
    ) -> Result<ProgressStatus, AppError> {
        let mut polls: u32 = 0;
        loop {
            let progress = self.get_async_progress(progress_token).await?;
            polls += 1;
            if progress.state.is_finished() {
                info!("Operation {} finished: {:?}", progress_token, progress.state);
                return Ok(progress);
            }
            if max_polls.is_some_and(|max| polls >= max) {
                return Ok(progress);
            }
            debug!(
                "Operation {} at {:?}%, polling again in {:?}",
                progress_token, progress.percentage, interval
            );
            tokio::time::sleep(interval).await;
        }
    }
}
