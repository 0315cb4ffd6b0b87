use serde::{Deserialize, Serialize};

/// Query string accepted by every contributors route
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefetchParams {
    #[serde(default)]
    pub refetch: Option<String>,
}

impl RefetchParams {
    /// Only the literal string "true" forces a refetch
    pub fn is_refetch(&self) -> bool {
        self.refetch.as_deref() == Some("true")
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub cached_repositories: usize,
}
