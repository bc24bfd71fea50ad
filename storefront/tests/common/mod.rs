// storefront/storefront/tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every fixture

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::sync::Arc;
use storefront::config::AppConfig;
use storefront::seed;
use storefront::state::AppState;
use storefront_core::models::Product;
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

/// Memory-backed configuration with the given overrides.
pub fn test_config(overrides: &[(&str, &str)]) -> AppConfig {
  let mut vars: Vec<(String, String)> = vec![
    ("STORE_BACKEND".to_string(), "memory".to_string()),
    ("SEED_ADMIN_EMAIL".to_string(), ADMIN_EMAIL.to_string()),
    ("SEED_ADMIN_PASSWORD".to_string(), ADMIN_PASSWORD.to_string()),
  ];
  vars.extend(overrides.iter().map(|(k, v)| (k.to_string(), v.to_string())));
  AppConfig::from_lookup(move |name: &str| {
    vars.iter().rev().find(|(k, _)| k == name).map(|(_, v)| v.clone())
  })
  .expect("test configuration should be valid")
}

/// State over a fresh memory store with the default settings and sample
/// catalog already seeded.
pub async fn seeded_state(overrides: &[(&str, &str)]) -> (AppState, MemoryStore) {
  setup_tracing();
  let store = MemoryStore::new();
  let config = test_config(overrides);
  seed::seed_store(&store, &config).await.expect("seeding should succeed");
  let state = AppState::new(config, Arc::new(store.clone())).expect("state should build");
  (state, store)
}

/// State over an empty store: no settings, no products.
pub fn empty_state() -> (AppState, MemoryStore) {
  setup_tracing();
  let store = MemoryStore::new();
  let state = AppState::new(test_config(&[]), Arc::new(store.clone())).expect("state should build");
  (state, store)
}

/// A COD order for `quantity` of the product's first size, shipped inside Dhaka.
pub fn cod_order_body(product: &Product, quantity: u32) -> Value {
  let total = product.price * i64::from(quantity) + 80;
  json!({
    "customerDetails": {
      "name": "Nusrat Jahan",
      "phone": "01711000000",
      "address": "House 5, Road 2, Dhanmondi",
      "city": "Dhaka"
    },
    "cartItems": [{
      "id": product.id.to_string(),
      "name": product.name,
      "price": product.price,
      "quantity": quantity,
      "image": product.images.first().cloned().unwrap_or_default(),
      "size": product.sizes[0]
    }],
    "total": total,
    "paymentInfo": { "paymentMethod": "COD" },
    "shippingOptionId": "inside-dhaka"
  })
}
