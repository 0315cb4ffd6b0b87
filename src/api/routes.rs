use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

#[cfg(not(test))]
use {
    axum::extract::ConnectInfo,
    std::net::IpAddr,
    std::sync::Arc,
    tower_governor::{governor::GovernorConfigBuilder, key_extractor::KeyExtractor, GovernorLayer},
};

use crate::api::handlers::{self, AppState};
use crate::config::Settings;

/// Create the router with all endpoints
#[cfg_attr(test, allow(unused_variables))]
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    #[cfg_attr(test, allow(unused_mut))]
    let mut api_routes = Router::new()
        .route("/:repo", get(handlers::get_all))
        .route("/:repo/:year", get(handlers::get_by_year))
        .route("/:repo/:year/:month", get(handlers::get_by_year_and_month))
        .with_state(state.clone());

    // Every cache miss fans out into many GitHub calls, so callers are throttled per IP
    #[cfg(not(test))]
    {
        #[derive(Clone, Copy, Debug)]
        struct FallbackIpKeyExtractor;

        impl KeyExtractor for FallbackIpKeyExtractor {
            type Key = IpAddr;

            fn extract<B>(
                &self,
                req: &axum::http::Request<B>,
            ) -> Result<Self::Key, tower_governor::GovernorError> {
                if let Some(ConnectInfo(addr)) =
                    req.extensions().get::<ConnectInfo<std::net::SocketAddr>>()
                {
                    return Ok(addr.ip());
                }

                Ok(IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)))
            }
        }

        let rate = settings.server.api_rate_limit.max(1);
        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(FallbackIpKeyExtractor)
                .per_millisecond((1000 / rate).max(1))
                .burst_size(u32::try_from(rate.saturating_mul(2)).unwrap_or(u32::MAX))
                .finish()
                .expect("governor period and burst size are non-zero"),
        );
        api_routes = api_routes.layer(GovernorLayer {
            config: governor_conf,
        });
    }

    let api_routes = api_routes;

    let health_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state);

    Router::new()
        .merge(health_routes)
        .nest(&format!("/api/{}", settings.github.org), api_routes)
        .layer(
            // Read-only public API
            CorsLayer::new()
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
