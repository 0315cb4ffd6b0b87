pub mod config;
pub mod error;

// GitHub REST access
pub mod github;

// Resolution pipeline
pub mod contributors;

// Transport
pub mod api;
pub mod cli;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
