use crate::github::{Contributor, FirstCommitAuthor, GitHubClient, RepositoryRef};
use crate::Result;
use futures::stream::{self, Stream, TryStreamExt};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Contributors requested per listing page
pub const PAGE_SIZE: u32 = 100;

/// Leading contributors of the listing that get first-commit resolution
pub const CANDIDATE_LIMIT: usize = 12;

/// Resolves the earliest authored commit of a repository's top contributors.
///
/// Only the first [`CANDIDATE_LIMIT`] entries of the provider-ordered
/// listing are resolved, so the result is not exhaustive over every
/// historical contributor. Every remote call is awaited before the next one
/// is issued.
pub struct ContributorResolver<'a> {
    client: &'a GitHubClient,
    max_pages: u32,
}

impl<'a> ContributorResolver<'a> {
    pub fn new(client: &'a GitHubClient, max_pages: u32) -> Self {
        Self { client, max_pages }
    }

    /// Lazily fetch listing pages from page 1 until an empty page or the page ceiling
    pub fn contributor_pages(
        &self,
        repo: &'a RepositoryRef,
    ) -> impl Stream<Item = Result<Vec<Contributor>>> + 'a {
        let client = self.client;
        let max_pages = self.max_pages;

        stream::try_unfold(1u32, move |page| next_page(client, repo, page, max_pages))
    }

    /// Assemble the full contributor listing in provider order
    pub async fn fetch_all_contributors(&self, repo: &'a RepositoryRef) -> Result<Vec<Contributor>> {
        self.contributor_pages(repo).try_concat().await
    }

    /// Resolve first-commit authors for the leading candidates of the listing.
    ///
    /// Candidates without any discoverable authored commit are left out.
    pub async fn resolve(&self, repo: &'a RepositoryRef) -> Result<Vec<FirstCommitAuthor>> {
        let contributors = self.fetch_all_contributors(repo).await?;
        info!(
            "Resolving first commits for {} of {} contributors of {}",
            contributors.len().min(CANDIDATE_LIMIT),
            contributors.len(),
            repo
        );

        let mut seen = HashSet::new();
        let mut authors = Vec::new();

        for contributor in contributors.iter().take(CANDIDATE_LIMIT) {
            if seen.contains(contributor.login.as_str()) {
                continue;
            }

            match self
                .client
                .first_commit_author(repo, &contributor.login)
                .await?
            {
                Some(author) => {
                    seen.insert(contributor.login.as_str());
                    authors.push(author);
                }
                None => debug!("No authored commit found for {}", contributor.login),
            }
        }

        Ok(authors)
    }
}

/// One step of the listing sequence: the page's entries and the next page number
async fn next_page(
    client: &GitHubClient,
    repo: &RepositoryRef,
    page: u32,
    max_pages: u32,
) -> Result<Option<(Vec<Contributor>, u32)>> {
    if page > max_pages {
        warn!(
            "Stopped listing contributors of {} after {} pages",
            repo, max_pages
        );
        return Ok(None);
    }

    let contributors = client.list_contributors(repo, page, PAGE_SIZE).await?;
    if contributors.is_empty() {
        return Ok(None);
    }

    debug!(
        "Fetched contributors page {} of {} ({} entries)",
        page,
        repo,
        contributors.len()
    );
    Ok(Some((contributors, page.saturating_add(1))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GitHubConfig;
    use mockito::Matcher;

    fn client_for(base: String) -> GitHubClient {
        GitHubClient::new(&GitHubConfig {
            api_base_url: base,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_last_representable_page_does_not_overflow() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/repos/facebook/react/contributors")
            .match_query(Matcher::UrlEncoded("page".into(), u32::MAX.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"login":"zpao","contributions":1}]"#)
            .create_async()
            .await;

        let client = client_for(server.url());
        let repo = RepositoryRef::new("facebook", "react");
        let (contributors, next) = next_page(&client, &repo, u32::MAX, u32::MAX)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(contributors.len(), 1);
        assert_eq!(next, u32::MAX);
    }

    #[tokio::test]
    async fn test_page_past_ceiling_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let listing = server
            .mock("GET", "/repos/facebook/react/contributors")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(server.url());
        let repo = RepositoryRef::new("facebook", "react");
        let step = next_page(&client, &repo, 3, 2).await.unwrap();

        assert!(step.is_none());
        listing.assert_async().await;
    }
}
