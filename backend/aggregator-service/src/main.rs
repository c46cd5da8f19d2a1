use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use aggregator_service::config::Config;
use aggregator_service::db::{create_pool, postgres::PgStore, run_migrations};
use aggregator_service::routes::configure_routes;
use aggregator_service::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = create_pool(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to connect to database")?;

    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    info!("database pool ready, migrations applied");

    let state = AppState::new(Arc::new(PgStore::new(pool)));

    let addr = (config.app.host.clone(), config.app.port);
    info!("starting aggregator-service on {}:{}", addr.0, addr.1);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .bind(addr)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")
}
