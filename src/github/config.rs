use crate::{Error, Result};
use std::env;

/// Largest accepted contributor page ceiling (ten million contributors)
pub const MAX_PAGE_CEILING: u32 = 100_000;

/// GitHub integration configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Personal access token sent as a bearer credential
    pub token: Option<String>,

    /// REST API root, overridable for GitHub Enterprise or tests
    pub api_base_url: String,

    /// Organization whose repositories are queried
    pub org: String,

    /// Display name reported back in responses
    pub org_label: String,

    /// Hard ceiling on contributor listing pages per resolution pass
    pub max_contributor_pages: u32,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl GitHubConfig {
    /// Create a new GitHubConfig from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let max_contributor_pages = match env::var("GITHUB_MAX_CONTRIBUTOR_PAGES") {
            Ok(value) => value.parse().map_err(|_| {
                Error::Config("Invalid GITHUB_MAX_CONTRIBUTOR_PAGES value".to_string())
            })?,
            Err(_) => defaults.max_contributor_pages,
        };

        let request_timeout_secs = match env::var("GITHUB_REQUEST_TIMEOUT") {
            Ok(value) => value
                .parse()
                .map_err(|_| Error::Config("Invalid GITHUB_REQUEST_TIMEOUT value".to_string()))?,
            Err(_) => defaults.request_timeout_secs,
        };

        Ok(Self {
            token: env::var("GITHUB_TOKEN").ok().filter(|t| !t.trim().is_empty()),
            api_base_url: env::var("GITHUB_API_URL").unwrap_or(defaults.api_base_url),
            org: env::var("GITHUB_ORG").unwrap_or(defaults.org),
            org_label: env::var("GITHUB_ORG_LABEL").unwrap_or(defaults.org_label),
            max_contributor_pages,
            request_timeout_secs,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.org.trim().is_empty() {
            return Err(Error::Config("GITHUB_ORG must not be empty".to_string()));
        }

        if self.max_contributor_pages == 0 {
            return Err(Error::Config(
                "GITHUB_MAX_CONTRIBUTOR_PAGES must be non-zero".to_string(),
            ));
        }

        if self.max_contributor_pages > MAX_PAGE_CEILING {
            return Err(Error::Config(format!(
                "GITHUB_MAX_CONTRIBUTOR_PAGES must be at most {MAX_PAGE_CEILING}"
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "GITHUB_REQUEST_TIMEOUT must be non-zero".to_string(),
            ));
        }

        url::Url::parse(&self.api_base_url)
            .map_err(|e| Error::Config(format!("Invalid GITHUB_API_URL: {e}")))?;

        Ok(())
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base_url: "https://api.github.com".to_string(),
            org: "facebook".to_string(),
            org_label: "Facebook".to_string(),
            max_contributor_pages: 500,
            request_timeout_secs: 30,
        }
    }
}
