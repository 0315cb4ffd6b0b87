use crate::github::FirstCommitAuthor;
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// A first-time contributor as reported in a bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributorEntry {
    pub name: String,
    pub email: String,
    pub date: DateTime<Utc>,
}

impl From<&FirstCommitAuthor> for ContributorEntry {
    fn from(author: &FirstCommitAuthor) -> Self {
        Self {
            name: author.name.clone(),
            email: author.email.clone(),
            date: author.date,
        }
    }
}

/// New contributors whose first commit falls in one month.
///
/// `total_count` only moves together with `contributors`, so the two always agree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionBucket {
    total_count: usize,
    contributors: Vec<ContributorEntry>,
}

impl ContributionBucket {
    pub fn push(&mut self, entry: ContributorEntry) {
        self.contributors.push(entry);
        self.total_count += 1;
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn contributors(&self) -> &[ContributorEntry] {
        &self.contributors
    }
}

/// Month key ("01".."12") to bucket
pub type MonthBuckets = BTreeMap<String, ContributionBucket>;

/// Aggregate over one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub total_count: usize,
    pub monthly_contributors: MonthBuckets,
}

/// Year ("2013") to month to bucket, for a single repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RepositoryBuckets {
    years: BTreeMap<String, MonthBuckets>,
}

impl RepositoryBuckets {
    /// Bucket each author by the UTC year and month of their first commit
    pub fn from_authors<'a>(authors: impl IntoIterator<Item = &'a FirstCommitAuthor>) -> Self {
        let mut buckets = Self::default();
        for author in authors {
            buckets.insert(author);
        }
        buckets
    }

    pub fn insert(&mut self, author: &FirstCommitAuthor) {
        let year = author.date.year().to_string();
        let month = format!("{:02}", author.date.month());

        self.years
            .entry(year)
            .or_default()
            .entry(month)
            .or_default()
            .push(ContributorEntry::from(author));
    }

    /// Bucket for an exact year/month key pair
    pub fn month(&self, year: &str, month: &str) -> Option<&ContributionBucket> {
        self.years.get(year).and_then(|months| months.get(month))
    }

    /// All of a year's months plus their summed count
    pub fn year(&self, year: &str) -> Option<YearSummary> {
        self.years.get(year).map(|months| YearSummary {
            total_count: months.values().map(ContributionBucket::total_count).sum(),
            monthly_contributors: months.clone(),
        })
    }

    pub fn years(&self) -> impl Iterator<Item = (&String, &MonthBuckets)> {
        self.years.iter()
    }

    /// Number of contributors across every bucket
    pub fn total_count(&self) -> usize {
        self.years
            .values()
            .flat_map(|months| months.values())
            .map(ContributionBucket::total_count)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}
