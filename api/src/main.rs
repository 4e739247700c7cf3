use std::sync::Arc;

use anyhow::Result;
use dotenv::dotenv;

use listings_api::config::Config;
use listings_api::observability::Observability;
use listings_api::repository::{InMemoryListingRepository, ListingRepository, PgListingRepository};
use listings_api::routes;
use listings_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let obs = Observability::init()?;
    let config = Config::from_env()?;

    let repo: Arc<dyn ListingRepository> = match &config.database {
        Some(db_config) => {
            let repo = PgListingRepository::connect(db_config).await?;
            repo.migrate().await?;
            Arc::new(repo)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, listings are kept in memory and lost on restart");
            Arc::new(InMemoryListingRepository::new())
        }
    };

    let state = AppState::new(repo, obs.registry.clone());
    let app = routes::app(state, &config);

    tracing::info!("API server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    obs.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
