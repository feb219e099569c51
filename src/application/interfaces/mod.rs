/// Content search and bitstream retrieval interface
pub mod content;
/// Entity (folder/asset) interface
pub mod entity;
/// Process monitor interface
pub mod monitor;
/// Workflow interface
pub mod workflow;
