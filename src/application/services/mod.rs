/// Content API implementation for [`Client`](crate::application::client::Client)
pub mod content_service;
/// Entity API implementation for [`Client`](crate::application::client::Client)
pub mod entity_service;
/// Process monitor API implementation for [`Client`](crate::application::client::Client)
pub mod monitor_service;
/// Workflow API implementation for [`Client`](crate::application::client::Client)
pub mod workflow_service;
