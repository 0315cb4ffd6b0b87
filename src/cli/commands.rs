use crate::contributors::{ContributorQuery, ContributorService};
use crate::github::GitHubConfig;
use crate::{Error, Result};

/// Run one query in-process and print the report
pub async fn contributors(
    config: &GitHubConfig,
    repository: String,
    year: Option<String>,
    month: Option<String>,
) -> Result<()> {
    let service = ContributorService::new(config)?;

    let query = ContributorQuery {
        repository,
        year,
        month,
        refetch: false,
    };
    let report = service.new_contributors(&query).await?;

    let rendered = serde_json::to_string_pretty(&report)
        .map_err(|e| Error::Internal(format!("Failed to render report: {e}")))?;
    println!("{rendered}");

    Ok(())
}
