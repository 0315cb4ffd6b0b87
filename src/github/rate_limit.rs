use crate::github::models::ApiErrorBody;
use crate::Error;
use chrono::{DateTime, Local, Utc};
use reqwest::{header::HeaderMap, StatusCode};
use tracing::{error, warn};

const RATE_LIMIT_MARKER: &str = "API rate limit exceeded";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// Read the quota reset instant from GitHub response headers
pub fn reset_from_headers(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    headers
        .get(RESET_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

/// Render a reset instant the way it is shown to callers, e.g. "May 24, 2013, 4:15 PM"
pub fn readable_reset_time(reset_at: Option<DateTime<Utc>>) -> String {
    match reset_at {
        Some(at) => at
            .with_timezone(&Local)
            .format("%b %-d, %Y, %-I:%M %p")
            .to_string(),
        None => "later".to_string(),
    }
}

/// Translate a failed GitHub response into a classified error.
///
/// Rate limiting (403/429 carrying GitHub's quota message) and missing
/// repositories get their own kinds; everything else becomes
/// [`Error::Upstream`] with the caller-supplied `fallback` message.
pub fn classify_failure(status: StatusCode, headers: &HeaderMap, body: &str, fallback: &str) -> Error {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_default();

    if (status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS)
        && message.contains(RATE_LIMIT_MARKER)
    {
        let reset_at = reset_from_headers(headers);
        warn!("GitHub rate limit exceeded (resets at {:?})", reset_at);
        return Error::RateLimited {
            message: format!(
                "GitHub API rate limit exceeded. Please try again after {}.",
                readable_reset_time(reset_at)
            ),
            reset_at,
        };
    }

    if status == StatusCode::NOT_FOUND {
        return Error::NotFound("Repository not found.".to_string());
    }

    error!("GitHub API error: {} - {}", status, body);
    Error::Upstream(fallback.to_string())
}
