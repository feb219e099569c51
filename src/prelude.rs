/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 10/10/26
******************************************************************************/

//! # Preservica Client Prelude
//!
//! Commonly used types and traits in one import:
//!
//! ```rust
//! use preservica_client::prelude::*;
//!
//! let overrides = CredentialOverrides::new()
//!     .username("archivist@example.org")
//!     .server("eu.preservica.com");
//! assert_eq!(overrides.server.as_deref(), Some("eu.preservica.com"));
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

pub use crate::application::config::{Config, CredentialOverrides, Credentials, HttpConfig};
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

pub use crate::error::AppError;

// ============================================================================
// CLIENT, AUTHENTICATION AND EXECUTOR
// ============================================================================

pub use crate::application::auth::{Auth, Session};
pub use crate::application::client::Client;
pub use crate::model::http::HttpClient;
pub use crate::model::requests::{ApiRequest, Payload, ResponseFormat};

// ============================================================================
// SERVICES (TRAITS)
// ============================================================================

pub use crate::application::interfaces::content::ContentService;
pub use crate::application::interfaces::entity::EntityService;
pub use crate::application::interfaces::monitor::MonitorService;
pub use crate::application::interfaces::workflow::WorkflowService;

// ============================================================================
// MODELS
// ============================================================================

pub use crate::model::content::{SearchHit, SearchQuery, ThumbnailSize};
pub use crate::model::entity::{Entity, EntityRef, EntityType, OperationState, ProgressStatus};
pub use crate::model::monitor::{Message, Monitor};
pub use crate::model::paging::{PageRequest, PagedSet, paginate};
pub use crate::model::workflow::{WorkflowInstance, WorkflowQuery};
pub use crate::model::xml::XmlNode;

// ============================================================================
// UTILITIES
// ============================================================================

pub use crate::utils::logger::setup_logger;
