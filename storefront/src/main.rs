// storefront/storefront/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use storefront::config::{AppConfig, LogFormat, StoreBackend};
use storefront::db::PgStore;
use storefront::state::AppState;
use storefront::{seed, web};
use storefront_core::{MemoryStore, Store};

fn init_tracing(format: LogFormat) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE);
  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Text => builder.init(),
  }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
  tracing::error!(error = %err, "{}", context);
  io::Error::other(format!("{}: {}", context, err))
}

async fn open_store(config: &AppConfig) -> io::Result<Arc<dyn Store>> {
  match config.store_backend {
    StoreBackend::Postgres => {
      let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| startup_error("Configuration error", "DATABASE_URL is not set"))?;
      let store = PgStore::connect(url, config.database_max_connections)
        .await
        .map_err(|e| startup_error("Failed to connect to the database", e))?;
      store
        .migrate()
        .await
        .map_err(|e| startup_error("Failed to run database migrations", e))?;
      tracing::info!("Connected to Postgres and applied migrations.");
      Ok(Arc::new(store))
    }
    StoreBackend::Memory => {
      tracing::warn!("Using the in-memory store; data is lost on shutdown.");
      Ok(Arc::new(MemoryStore::new()))
    }
  }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
  dotenvy::dotenv().ok();

  // The subscriber has to exist before the config logs anything.
  let log_format = std::env::var("LOG_FORMAT")
    .ok()
    .and_then(|v| v.parse().ok())
    .unwrap_or(LogFormat::Text);
  init_tracing(log_format);

  tracing::info!("Starting storefront server...");

  let app_config = AppConfig::from_env().map_err(|e| startup_error("Failed to load application configuration", e))?;
  let store = open_store(&app_config).await?;

  if app_config.seed_db {
    let report = seed::seed_store(&*store, &app_config)
      .await
      .map_err(|e| startup_error("Failed to seed the store", e))?;
    tracing::info!(
      settings_created = report.settings_created,
      products_created = report.products_created,
      "Seeding finished."
    );
  }

  let json_limit = app_config.json_payload_limit_bytes;
  let server_address = app_config.server_address();
  let app_state = AppState::new(app_config, store).map_err(|e| startup_error("Failed to build application state", e))?;

  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .app_data(web::json_config(json_limit))
      .configure(web::configure_app_routes)
      .wrap(tracing_actix_web::TracingLogger::default())
  })
  .bind(&server_address)?
  .run()
  .await
}
