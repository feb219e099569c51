/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 6/10/26
******************************************************************************/

//! Error type shared by every module of the client

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the library
#[derive(Debug, Error)]
pub enum AppError {
    /// A required credential could not be resolved from arguments, environment or config file
    #[error("configuration error: missing required credential '{field}'")]
    Configuration {
        /// Name of the missing field (e.g. `username`)
        field: String,
    },

    /// The login exchange was rejected by the server
    #[error("authentication failed with status {status}: {message}")]
    Authentication {
        /// HTTP status returned by the login endpoint
        status: StatusCode,
        /// Body returned by the server
        message: String,
    },

    /// The request was still unauthorized after a fresh token was obtained
    #[error("unauthorized: {url}")]
    Unauthorized {
        /// URL that kept answering 401
        url: String,
    },

    /// The referenced entity does not exist
    #[error("not found: {reference}")]
    NotFound {
        /// Identifier that was requested
        reference: String,
    },

    /// Any other non-success status
    #[error("request to {url} failed with status {status}: {body}")]
    RequestFailed {
        /// HTTP status code
        status: StatusCode,
        /// Requested URL
        url: String,
        /// Raw response body
        body: String,
    },

    /// Transport level failure (connection, timeout, TLS)
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization failure
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML parsing failure
    #[error("xml error: {0}")]
    Xml(String),

    /// Response body did not have the expected shape
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Local file system failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The credentials file could not be read
    #[error("config file error: {0}")]
    ConfigFile(#[from] dotenv::Error),

    /// Caller supplied an invalid argument
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Returns the HTTP status carried by the error, if any
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Authentication { status, .. } | AppError::RequestFailed { status, .. } => {
                Some(*status)
            }
            AppError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            AppError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            AppError::Http(e) => e.status(),
            _ => None,
        }
    }
}
