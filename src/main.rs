use liftlog::api::routes::create_routes;
use liftlog::config::{run_migrations, AppConfig, DatabaseConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app_config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    // RUST_LOG wins; the configured level is the fallback.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&app_config.log_level)),
        )
        .init();

    let pool = db_config.create_pool().await?;
    run_migrations(&pool).await?;

    let app = create_routes(pool);

    let listener = TcpListener::bind(app_config.server_address()).await?;
    info!("liftlog server starting on http://{}", app_config.server_address());
    info!("Health check available at http://{}/health", app_config.server_address());

    axum::serve(listener, app).await?;

    Ok(())
}
