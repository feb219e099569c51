
mod auth_tests;
mod content_tests;
mod executor_tests;
mod workflow_tests;
