use clap::Parser;
use newcomers::{
    api::{create_router, AppState},
    cli::{Cli, Commands},
    config::Settings,
    contributors::ContributorService,
    Result,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,newcomers=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let settings = Settings::from_env()?;
    settings.validate()?;

    if settings.github.token.is_none() {
        warn!("GITHUB_TOKEN is not set; GitHub allows only 60 unauthenticated requests per hour");
    }

    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Contributors {
            repository,
            year,
            month,
        } => {
            newcomers::cli::commands::contributors(&settings.github, repository, year, month)
                .await?;
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting newcomers server");
    info!(
        "GitHub: {} (org: {})",
        settings.github.api_base_url, settings.github.org
    );

    let service = Arc::new(ContributorService::new(&settings.github)?);
    let state = AppState { service };

    let app = create_router(state, &settings);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .inspect_err(|e| error!("Failed to bind to {}: {}", addr, e))?;

    info!("Server listening on {}", addr);
    info!(
        "Serving GET /api/{}/:repo[/:year[/:month]]",
        settings.github.org
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .inspect_err(|e| error!("Server error: {}", e))?;

    info!("Shutting down...");
    Ok(())
}
