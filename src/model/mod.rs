/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/10/26
******************************************************************************/
/// Login response models
pub mod auth;
/// Content search models
pub mod content;
/// Entity models
pub mod entity;
/// Authenticated request executor
pub mod http;
/// Process monitor models
pub mod monitor;
/// Pagination primitives shared by all listings
pub mod paging;
/// Request description sent through the executor
pub mod requests;
/// JSON response envelopes
pub mod responses;
/// Workflow models
pub mod workflow;
/// Namespace-agnostic XML reader
pub mod xml;
