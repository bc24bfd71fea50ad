// storefront/client/tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every fixture

use actix_web::{web, App, HttpServer};
use once_cell::sync::Lazy;
use std::sync::Arc;
use storefront::config::AppConfig;
use storefront::seed;
use storefront::state::AppState;
use storefront::web::{configure_app_routes, json_config};
use storefront_core::models::CustomerDetails;
use storefront_core::MemoryStore;
use tracing::Level;

// --- Tracing ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub const ADMIN_EMAIL: &str = "admin@sazo.test";
pub const ADMIN_PASSWORD: &str = "s3cret-pass";

pub struct TestServer {
  pub base_url: String,
  pub store: MemoryStore,
}

/// Starts the storefront server on an ephemeral port over a seeded memory
/// store. Must be called from within an actix runtime.
pub async fn spawn_server() -> TestServer {
  setup_tracing();
  let vars = [
    ("STORE_BACKEND", "memory"),
    ("SEED_ADMIN_EMAIL", ADMIN_EMAIL),
    ("SEED_ADMIN_PASSWORD", ADMIN_PASSWORD),
  ];
  let config = AppConfig::from_lookup(|name: &str| {
    vars.iter().find(|(k, _)| *k == name).map(|(_, v)| v.to_string())
  })
  .expect("test configuration should be valid");

  let store = MemoryStore::new();
  seed::seed_store(&store, &config).await.expect("seeding should succeed");
  let json_limit = config.json_payload_limit_bytes;
  let state = AppState::new(config, Arc::new(store.clone())).expect("state should build");

  let server = HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(state.clone()))
      .app_data(json_config(json_limit))
      .configure(configure_app_routes)
  })
  .workers(1)
  .bind(("127.0.0.1", 0))
  .expect("bind to an ephemeral port");
  let addr = server.addrs()[0];
  actix_web::rt::spawn(server.run());

  TestServer {
    base_url: format!("http://{}", addr),
    store,
  }
}

pub fn customer() -> CustomerDetails {
  CustomerDetails {
    name: "Nusrat Jahan".to_string(),
    phone: "01711000000".to_string(),
    address: "House 5, Road 2, Dhanmondi".to_string(),
    city: "Dhaka".to_string(),
  }
}
