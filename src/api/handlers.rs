use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use crate::{
    api::models::*,
    contributors::{ContributorQuery, NewContributorsReport, SharedContributorService},
    Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: SharedContributorService,
}

/// GET /api/{org}/:repo - Every bucket recorded for a repository
pub async fn get_all(
    State(state): State<AppState>,
    Path(repo): Path<String>,
    Query(params): Query<RefetchParams>,
) -> Result<Json<NewContributorsReport>> {
    debug!("New contributors request: {} {:?}", repo, params);

    let query = ContributorQuery::new(repo).refetch(params.is_refetch());
    Ok(Json(state.service.new_contributors(&query).await?))
}

/// GET /api/{org}/:repo/:year - New contributors for a given year
pub async fn get_by_year(
    State(state): State<AppState>,
    Path((repo, year)): Path<(String, String)>,
    Query(params): Query<RefetchParams>,
) -> Result<Json<NewContributorsReport>> {
    debug!("New contributors request: {} {} {:?}", repo, year, params);

    let query = ContributorQuery::new(repo)
        .year(year)
        .refetch(params.is_refetch());
    Ok(Json(state.service.new_contributors(&query).await?))
}

/// GET /api/{org}/:repo/:year/:month - New contributors for a given year and month
pub async fn get_by_year_and_month(
    State(state): State<AppState>,
    Path((repo, year, month)): Path<(String, String, String)>,
    Query(params): Query<RefetchParams>,
) -> Result<Json<NewContributorsReport>> {
    debug!(
        "New contributors request: {} {}-{} {:?}",
        repo, year, month, params
    );

    let query = ContributorQuery::new(repo)
        .year(year)
        .month(month)
        .refetch(params.is_refetch());
    Ok(Json(state.service.new_contributors(&query).await?))
}

/// GET /health - Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        cached_repositories: state.service.cache().len().await,
    }))
}
