//! # Preservica Client
//!
//! Async client for the Preservica digital preservation REST APIs.
//!
//! The crate is organised around one authenticated request executor
//! ([`model::http::HttpClient`]) that every API family goes through:
//!
//! - credentials are resolved from explicit arguments, `PRESERVICA_*`
//!   environment variables or a `credentials.properties` file, in that order
//! - a bearer token is obtained by logging in and sent on every request
//! - a request answered with 401 is replayed once with a fresh token
//! - listings come back as [`model::paging::PagedSet`] pages and can be
//!   consumed lazily as item streams
//!
//! ## Example
//!
//! ```ignore
//! use futures::TryStreamExt;
//! use preservica_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     setup_logger();
//!     let client = Client::from_env().await?;
//!
//!     let folders: Vec<EntityRef> = client.children(None).try_collect().await?;
//!     for folder in &folders {
//!         println!("{} {}", folder.reference, folder.title.as_deref().unwrap_or(""));
//!     }
//!
//!     let asset = client.get_entity(EntityType::Asset, "de1c32a3-bd9f-4843-a5f1-46df080f83d2").await?;
//!     println!("{asset}");
//!     Ok(())
//! }
//! ```

/// Client, configuration, authentication and API services
pub mod application;
/// Library-wide constants
pub mod constants;
/// Error type
pub mod error;
/// Wire models, pagination and the request executor
pub mod model;
/// Commonly used re-exports
pub mod prelude;
/// Environment and logging helpers
pub mod utils;

/// Re-export of the configuration module at the crate root
pub use application::config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
