/// Module containing environment and credentials-file helpers
pub mod config;
/// Module containing logging utilities
pub mod logger;

pub use logger::*;
