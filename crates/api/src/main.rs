use anyhow::Result;
use std::time::Duration;
use tracing::info;

mod app;
mod config;
mod error;
mod extractors;
mod jobs;
mod middleware;
mod routes;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::metrics::init_metrics();

    info!("Starting CertFlow API v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&config.database).await?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/migrations").run(&pool).await?;
    info!("Migrations completed");

    // Background jobs: expiry recompute and pool gauge export
    let mut scheduler = jobs::JobScheduler::new();
    scheduler.register(jobs::ExpiryRecomputeJob::new(
        pool.clone(),
        config.jobs.recompute_interval_minutes,
        config.jobs.notifications_enabled,
    ));
    scheduler.register(jobs::PoolMetricsJob::new(pool.clone()));
    scheduler.start();

    let app = app::create_app(config.clone(), pool);

    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    scheduler.shutdown();
    scheduler.wait_for_shutdown(Duration::from_secs(10)).await;

    Ok(())
}
