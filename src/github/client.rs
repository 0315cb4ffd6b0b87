use crate::github::{
    config::GitHubConfig,
    models::{CommitSummary, Contributor, FirstCommitAuthor, Repository, RepositoryRef},
    rate_limit::classify_failure,
};
use crate::{Error, Result};
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

const REPOSITORY_FAILURE: &str = "Failed to fetch repository info from GitHub.";
const CONTRIBUTORS_FAILURE: &str = "Failed to fetch Contributors info from GitHub.";
const FIRST_COMMIT_FAILURE: &str = "Failed to fetch First Commit info from GitHub.";

/// GitHub API client
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("newcomers/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        if let Some(token) = &config.token {
            let mut auth_value = header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| Error::Internal(format!("Invalid GitHub token: {e}")))?;
            auth_value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, auth_value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| Error::Config(format!("Invalid GITHUB_API_URL: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Build `{base}/repos/{owner}/{repo}/{extra...}` with each segment escaped
    fn repo_url(&self, repo: &RepositoryRef, extra: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Internal("GitHub API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["repos", repo.owner.as_str(), repo.name.as_str()])
            .extend(extra);
        Ok(url)
    }

    /// Issue a GET and classify any failure, using `failure` as the generic message
    async fn send(&self, url: Url, failure: &str) -> Result<Response> {
        debug!("GitHub API request: GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            error!("GitHub API request failed: {}", e);
            Error::Upstream(failure.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        Err(classify_failure(status, &headers, &body, failure))
    }

    async fn decode<T>(response: Response, failure: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        response.json::<T>().await.map_err(|e| {
            error!("Failed to parse GitHub API response: {}", e);
            Error::Upstream(failure.to_string())
        })
    }

    /// Get repository information
    pub async fn get_repository(&self, repo: &RepositoryRef) -> Result<Repository> {
        let url = self.repo_url(repo, &[])?;
        let response = self.send(url, REPOSITORY_FAILURE).await?;
        Self::decode(response, REPOSITORY_FAILURE).await
    }

    /// Get one page of the contributor listing (1-based page numbers)
    pub async fn list_contributors(
        &self,
        repo: &RepositoryRef,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Contributor>> {
        let mut url = self.repo_url(repo, &["contributors"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());

        let response = self.send(url, CONTRIBUTORS_FAILURE).await?;

        // Empty repositories answer with 204 and no body
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        Self::decode(response, CONTRIBUTORS_FAILURE).await
    }

    /// Get the author of the earliest commit authored by `login`, if any
    pub async fn first_commit_author(
        &self,
        repo: &RepositoryRef,
        login: &str,
    ) -> Result<Option<FirstCommitAuthor>> {
        let mut url = self.repo_url(repo, &["commits"])?;
        url.query_pairs_mut()
            .append_pair("author", login)
            .append_pair("per_page", "1")
            .append_pair("sort", "author-date")
            .append_pair("order", "asc");

        let response = self.send(url, FIRST_COMMIT_FAILURE).await?;
        let commits: Vec<CommitSummary> = Self::decode(response, FIRST_COMMIT_FAILURE).await?;

        Ok(commits.into_iter().next().and_then(|c| c.commit.author))
    }
}
