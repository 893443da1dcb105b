use anyhow::{Context, Result};
use product::{
    config::myconfig::Config, di::DependenciesInjectDeps, handler::AppRouter, state::AppState,
};
use shared::{
    config::{ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger},
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, state, telemetry) = setup().await.context("Failed to setup application")?;

    let metrics_handle = state.spawn_metrics_collector();

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    metrics_handle.abort();

    if let Some(telemetry) = telemetry {
        if let Err(e) = telemetry.shutdown() {
            error!("Failed to shutdown telemetry: {e}");
        }
    }

    info!("✅ Product Service shutdown complete.");

    Ok(())
}

async fn setup() -> Result<(Config, AppState, Option<Telemetry>)> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = match config.otel_endpoint.as_deref() {
        Some(endpoint) => Some(
            Telemetry::init("product-service", endpoint).context("Failed to init telemetry")?,
        ),
        None => None,
    };

    init_logger(
        telemetry.as_ref().map(Telemetry::logger_provider),
        "product-service",
        config.is_dev,
        config.enable_file_log,
    )?;

    info!("🚀 Starting Product Service initialization...");
    info!("🏷️ Product code strategy: {}", config.code_strategy);

    let db_pool =
        ConnectionManager::new_pool(&config.database_url, config.db_min_conn, config.db_max_conn)
            .await
            .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let deps = DependenciesInjectDeps::postgres(db_pool, config.code_strategy);
    let state = AppState::new(deps);

    info!("✅ Application setup completed successfully.");
    Ok((config, state, telemetry))
}

pub async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("🗄️ Database migrations applied");
    Ok(())
}
