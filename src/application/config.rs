/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 6/10/26
******************************************************************************/

//! Client configuration and credential resolution
//!
//! Every credential field is resolved from, in order:
//! 1. the explicit value in [`CredentialOverrides`]
//! 2. the matching `PRESERVICA_*` environment variable
//! 3. the `key=value` credentials file (`credentials.properties` by default)

use crate::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_PAGE_SIZE, DEFAULT_PROTOCOL, ENV_CONFIG_FILE,
    ENV_CONNECT_TIMEOUT_SECS, ENV_PAGE_SIZE, ENV_PASSWORD, ENV_PROTOCOL, ENV_SERVER, ENV_TENANT,
    ENV_TIMEOUT_SECS, ENV_USERNAME,
};
use crate::error::AppError;
use crate::utils::config::{get_env_or_default, get_env_or_none, non_empty, read_key_values};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Authentication credentials for the Preservica APIs
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Login name of the API user
    pub username: String,
    /// Password of the API user
    pub password: String,
    /// Tenant the user belongs to, if the server needs it on login
    pub tenant: Option<String>,
    /// Host name (and optional port) of the Preservica server
    pub server: String,
    /// `http` or `https`
    pub protocol: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .field("tenant", &self.tenant)
            .field("server", &self.server)
            .field("protocol", &self.protocol)
            .finish()
    }
}

/// Explicit values passed by the caller; they win over environment and file
#[derive(Debug, Clone, Default)]
pub struct CredentialOverrides {
    /// Explicit username
    pub username: Option<String>,
    /// Explicit password
    pub password: Option<String>,
    /// Explicit tenant
    pub tenant: Option<String>,
    /// Explicit server, either `host[:port]` or a full `scheme://host[:port]`
    pub server: Option<String>,
    /// Explicit protocol
    pub protocol: Option<String>,
    /// Alternative credentials file
    pub config_file: Option<PathBuf>,
}

impl CredentialOverrides {
    /// Creates an empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the username
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the tenant
    #[must_use]
    pub fn tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    /// Sets the server
    #[must_use]
    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Sets the protocol
    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Sets the credentials file to read
    #[must_use]
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }
}

impl Credentials {
    /// Resolves credentials from overrides, the process environment and the credentials file
    ///
    /// # Errors
    /// * `AppError::Configuration` naming the first required field left unresolved
    /// * `AppError::ConfigFile` if the credentials file exists but cannot be parsed
    pub fn resolve(overrides: &CredentialOverrides) -> Result<Self, AppError> {
        let path = overrides
            .config_file
            .clone()
            .or_else(|| get_env_or_none::<PathBuf>(ENV_CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let file = read_key_values(&path)?;
        Self::resolve_with(overrides, |key| env::var(key).ok(), &file)
    }

    /// Resolves credentials against an arbitrary environment lookup and file contents
    ///
    /// `file` keys are the lower-case field names (`username`, `password`,
    /// `tenant`, `server`, `protocol`).
    pub fn resolve_with<E>(
        overrides: &CredentialOverrides,
        env_lookup: E,
        file: &HashMap<String, String>,
    ) -> Result<Self, AppError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: &Option<String>, env_var: &str, key: &str| -> Option<String> {
            if let Some(v) = non_empty(explicit.clone()) {
                debug!("{} taken from explicit argument", key);
                return Some(v);
            }
            if let Some(v) = non_empty(env_lookup(env_var)) {
                debug!("{} taken from {}", key, env_var);
                return Some(v);
            }
            let v = non_empty(file.get(key).cloned());
            if v.is_some() {
                debug!("{} taken from credentials file", key);
            }
            v
        };
        let required = |value: Option<String>, field: &str| {
            value.ok_or_else(|| AppError::Configuration {
                field: field.to_string(),
            })
        };

        let username = required(pick(&overrides.username, ENV_USERNAME, "username"), "username")?;
        let password = required(pick(&overrides.password, ENV_PASSWORD, "password"), "password")?;
        let server = required(pick(&overrides.server, ENV_SERVER, "server"), "server")?;
        let tenant = pick(&overrides.tenant, ENV_TENANT, "tenant");
        let protocol = pick(&overrides.protocol, ENV_PROTOCOL, "protocol");

        let (server, protocol) = split_server(&server, protocol)?;

        Ok(Self {
            username,
            password,
            tenant,
            server,
            protocol,
        })
    }

    /// Base URL of the server, e.g. `https://eu.preservica.com`
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.protocol, self.server)
    }
}

/// Separates an optional scheme from the server string and validates the protocol
fn split_server(server: &str, protocol: Option<String>) -> Result<(String, String), AppError> {
    let (scheme, host) = match server.split_once("://") {
        Some((scheme, host)) => (Some(scheme.to_lowercase()), host),
        None => (None, server),
    };
    let host = host.trim_end_matches('/').to_string();
    if host.is_empty() {
        return Err(AppError::Configuration {
            field: "server".to_string(),
        });
    }

    let protocol = scheme
        .or_else(|| protocol.map(|p| p.to_lowercase()))
        .unwrap_or_else(|| DEFAULT_PROTOCOL.to_string());
    if protocol != "http" && protocol != "https" {
        return Err(AppError::InvalidInput(format!(
            "unsupported protocol '{protocol}'"
        )));
    }
    Ok((host, protocol))
}

/// Transport options; everything here is opt-in
#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds (None = transport default)
    pub timeout_secs: Option<u64>,
    /// Connect timeout in seconds (None = transport default)
    pub connect_timeout_secs: Option<u64>,
    /// Number of items requested per page by the lazy listings
    pub page_size: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            connect_timeout_secs: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl HttpConfig {
    /// Reads transport options from the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            timeout_secs: get_env_or_none(ENV_TIMEOUT_SECS),
            connect_timeout_secs: get_env_or_none(ENV_CONNECT_TIMEOUT_SECS),
            page_size: get_env_or_default(ENV_PAGE_SIZE, DEFAULT_PAGE_SIZE).max(1),
        }
    }
}

/// Main configuration for the client
#[derive(Debug, Clone)]
pub struct Config {
    /// Resolved credentials
    pub credentials: Credentials,
    /// Transport options
    pub http: HttpConfig,
}

impl Config {
    /// Builds a configuration from explicit credentials and default transport options
    #[must_use]
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials,
            http: HttpConfig::default(),
        }
    }

    /// Resolves a configuration using the given overrides
    ///
    /// A `.env` file in the working directory is loaded first, so its values
    /// behave like environment variables.
    pub fn new(overrides: &CredentialOverrides) -> Result<Self, AppError> {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        Ok(Self {
            credentials: Credentials::resolve(overrides)?,
            http: HttpConfig::from_env(),
        })
    }

    /// Resolves a configuration from environment and credentials file only
    pub fn from_env() -> Result<Self, AppError> {
        Self::new(&CredentialOverrides::default())
    }

    /// Replaces the transport options
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }
}
