//! First-time contributor resolution: repository lookup, period validation,
//! first-commit resolution, and the bucketed per-repository cache.

pub mod buckets;
pub mod cache;
pub mod resolver;
pub mod service;
pub mod validator;

pub use buckets::{ContributionBucket, ContributorEntry, RepositoryBuckets, YearSummary};
pub use cache::ContributorCache;
pub use resolver::{ContributorResolver, CANDIDATE_LIMIT, PAGE_SIZE};
pub use service::{
    ContributorQuery, ContributorService, NewContributors, NewContributorsReport,
    SharedContributorService,
};
pub use validator::validate_date_params;
