pub mod client;
pub mod config;
pub mod models;
pub mod rate_limit;

pub use client::GitHubClient;
pub use config::GitHubConfig;
pub use models::{Contributor, FirstCommitAuthor, Repository, RepositoryRef};
pub use rate_limit::classify_failure;
