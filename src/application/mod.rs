/// Login exchange and session management
pub mod auth;
/// Client entry point
pub mod client;
/// Application configuration module
pub mod config;
/// Service interfaces
pub mod interfaces;
/// Service implementations
pub mod services;
