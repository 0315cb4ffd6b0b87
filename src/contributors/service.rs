use crate::contributors::{
    buckets::{ContributionBucket, RepositoryBuckets, YearSummary},
    cache::ContributorCache,
    resolver::ContributorResolver,
    validator::validate_date_params,
};
use crate::github::{GitHubClient, GitHubConfig, RepositoryRef};
use crate::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One request against the pipeline
#[derive(Debug, Clone, Default)]
pub struct ContributorQuery {
    pub repository: String,
    pub year: Option<String>,
    pub month: Option<String>,
    pub refetch: bool,
}

impl ContributorQuery {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            ..Default::default()
        }
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    pub fn refetch(mut self, refetch: bool) -> Self {
        self.refetch = refetch;
        self
    }
}

/// The slice of the cached structure a query asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NewContributors {
    Month(ContributionBucket),
    Year(YearSummary),
    All(RepositoryBuckets),
    /// Nothing recorded for the requested period; renders as `[]`
    Empty(Vec<ContributionBucket>),
}

impl NewContributors {
    fn empty() -> Self {
        NewContributors::Empty(Vec::new())
    }

    /// Project a repository's buckets down to the requested granularity.
    /// Keys are looked up verbatim.
    pub fn project(buckets: &RepositoryBuckets, year: Option<&str>, month: Option<&str>) -> Self {
        match (year, month) {
            (Some(year), Some(month)) => buckets
                .month(year, month)
                .cloned()
                .map_or_else(Self::empty, NewContributors::Month),
            (Some(year), None) => buckets
                .year(year)
                .map_or_else(Self::empty, NewContributors::Year),
            _ => NewContributors::All(buckets.clone()),
        }
    }
}

/// Response body for a new-contributors query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContributorsReport {
    pub org: String,
    pub repository: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    pub new_contributors: NewContributors,
}

/// Entry point of the new-contributors pipeline
#[derive(Clone)]
pub struct ContributorService {
    client: GitHubClient,
    cache: ContributorCache,
    org: String,
    org_label: String,
    max_pages: u32,
}

impl ContributorService {
    /// Create a new service; the credential in `config` is fixed for its lifetime
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        Ok(Self {
            client: GitHubClient::new(config)?,
            cache: ContributorCache::new(),
            org: config.org.clone(),
            org_label: config.org_label.clone(),
            max_pages: config.max_contributor_pages,
        })
    }

    pub fn cache(&self) -> &ContributorCache {
        &self.cache
    }

    /// Answer a query: look up the repository, validate the period, then serve
    /// the bucketed contributors from cache or a fresh resolution pass.
    pub async fn new_contributors(&self, query: &ContributorQuery) -> Result<NewContributorsReport> {
        let repo = RepositoryRef::new(self.org.as_str(), query.repository.as_str());
        let year = query.year.as_deref().filter(|y| !y.is_empty());
        let month = query.month.as_deref().filter(|m| !m.is_empty());

        let metadata = self.client.get_repository(&repo).await?;
        debug!("{} created at {}", repo, metadata.created_at);

        validate_date_params(metadata.created_at, year, month)?;

        let buckets = self
            .cache
            .get_or_populate(&query.repository, query.refetch, || self.populate(&repo))
            .await?;

        Ok(NewContributorsReport {
            org: self.org_label.clone(),
            repository: query.repository.clone(),
            year: year.map(str::to_string),
            month: year.and(month).map(str::to_string),
            new_contributors: NewContributors::project(&buckets, year, month),
        })
    }

    async fn populate(&self, repo: &RepositoryRef) -> Result<RepositoryBuckets> {
        let resolver = ContributorResolver::new(&self.client, self.max_pages);
        let authors = resolver.resolve(repo).await?;
        let buckets = RepositoryBuckets::from_authors(&authors);

        if buckets.is_empty() {
            warn!("No first commits could be resolved for {}", repo);
        }
        info!(
            "Cached {} new contributors across {} years for {}",
            buckets.total_count(),
            buckets.years().count(),
            repo
        );
        Ok(buckets)
    }
}

/// Shared handle used by the transport layers
pub type SharedContributorService = Arc<ContributorService>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::FirstCommitAuthor;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample() -> RepositoryBuckets {
        let author = |name: &str, y, m| FirstCommitAuthor {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            date: Utc.with_ymd_and_hms(y, m, 10, 9, 0, 0).unwrap(),
        };
        RepositoryBuckets::from_authors(&[
            author("ada", 2013, 5),
            author("brian", 2013, 6),
            author("cleo", 2013, 6),
        ])
    }

    #[test]
    fn test_project_month() {
        let projected = NewContributors::project(&sample(), Some("2013"), Some("06"));
        match projected {
            NewContributors::Month(bucket) => assert_eq!(bucket.total_count(), 2),
            other => panic!("expected month bucket, got {other:?}"),
        }
    }

    #[test]
    fn test_project_missing_month_is_empty_list() {
        let projected = NewContributors::project(&sample(), Some("2020"), Some("01"));
        assert_eq!(serde_json::to_value(&projected).unwrap(), json!([]));
    }

    #[test]
    fn test_project_year_sums_months() {
        let projected = NewContributors::project(&sample(), Some("2013"), None);
        let value = serde_json::to_value(&projected).unwrap();
        assert_eq!(value["totalCount"], 3);
        assert_eq!(value["monthlyContributors"]["05"]["totalCount"], 1);
        assert_eq!(value["monthlyContributors"]["06"]["totalCount"], 2);
    }

    #[test]
    fn test_project_missing_year_is_empty_list() {
        let projected = NewContributors::project(&sample(), Some("2019"), None);
        assert_eq!(serde_json::to_value(&projected).unwrap(), json!([]));
    }

    #[test]
    fn test_project_everything() {
        let buckets = sample();
        let projected = NewContributors::project(&buckets, None, None);
        assert_eq!(projected, NewContributors::All(buckets));
    }

    #[test]
    fn test_report_omits_absent_period() {
        let report = NewContributorsReport {
            org: "Facebook".to_string(),
            repository: "react".to_string(),
            year: None,
            month: None,
            new_contributors: NewContributors::project(&sample(), None, None),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("year").is_none());
        assert!(value.get("month").is_none());
        assert_eq!(value["newContributors"]["2013"]["06"]["totalCount"], 2);
    }
}
