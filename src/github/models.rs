use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Organization + repository name pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// GitHub repository information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

/// Entry of the contributors listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    #[serde(default)]
    pub contributions: Option<u64>,

    /// Remaining provider fields, kept as-is
    #[serde(flatten)]
    pub raw: serde_json::Map<String, serde_json::Value>,
}

/// Entry of the commits listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub commit: CommitDetails,
}

/// Git-level commit data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetails {
    #[serde(default)]
    pub author: Option<FirstCommitAuthor>,
}

/// Git author of a contributor's earliest commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstCommitAuthor {
    pub name: String,
    pub email: String,
    pub date: DateTime<Utc>,
}

/// Body GitHub attaches to error responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contributor_keeps_raw_fields() {
        let json = r#"{"login":"gaearon","id":810438,"contributions":1800,"type":"User"}"#;
        let contributor: Contributor = serde_json::from_str(json).unwrap();
        assert_eq!(contributor.login, "gaearon");
        assert_eq!(contributor.contributions, Some(1800));
        assert_eq!(contributor.raw["type"], "User");
    }

    #[test]
    fn test_contributor_without_login_is_rejected() {
        let json = r#"{"id":1,"contributions":3}"#;
        assert!(serde_json::from_str::<Contributor>(json).is_err());
    }

    #[test]
    fn test_commit_author_parses_date() {
        let json = r#"{
            "sha": "abc",
            "commit": {
                "author": {"name": "Jordan", "email": "j@example.com", "date": "2013-05-29T20:09:10Z"}
            }
        }"#;
        let commit: CommitSummary = serde_json::from_str(json).unwrap();
        let author = commit.commit.author.unwrap();
        assert_eq!(author.date.to_rfc3339(), "2013-05-29T20:09:10+00:00");
    }

    #[test]
    fn test_repository_ref_display() {
        assert_eq!(RepositoryRef::new("facebook", "react").to_string(), "facebook/react");
    }
}
