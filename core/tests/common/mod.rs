// storefront/core/tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every fixture

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use storefront_core::models::{
  CartItem, CustomerDetails, Order, OrderRequest, OrderStatus, PaymentDetails, PaymentInfo, PaymentMethod,
  ShippingOption,
};
use storefront_core::{CheckoutOptions, IdSource, MemoryStore, OrderStore, StoreError, StoreResult};
use tracing::Level;
use uuid::Uuid;

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

// --- Fixtures ---
pub fn line(id: &str, price: i64, quantity: u32, size: &str) -> CartItem {
  CartItem {
    product_id: id.to_string(),
    name: format!("Product {}", id),
    price,
    quantity,
    image: String::new(),
    size: size.to_string(),
  }
}

pub fn shipping(id: &str, charge: i64) -> ShippingOption {
  ShippingOption {
    id: id.to_string(),
    label: format!("Shipping {}", id),
    charge,
  }
}

pub fn checkout_options() -> CheckoutOptions {
  CheckoutOptions {
    cod_enabled: true,
    online_payment_enabled: true,
    online_payment_methods: vec!["bKash".to_string(), "Nagad".to_string()],
    shipping_options: vec![shipping("inside", 100), shipping("outside", 150)],
    city_required: true,
  }
}

pub fn order_request(items: Vec<CartItem>, method: PaymentMethod, total: i64) -> OrderRequest {
  let payment_details = match method {
    PaymentMethod::Cod => None,
    PaymentMethod::Online => Some(PaymentDetails {
      payment_number: "01811111111".to_string(),
      method: "bKash".to_string(),
      amount: total,
      transaction_id: "8N7A6D5F".to_string(),
    }),
  };
  OrderRequest {
    customer_details: CustomerDetails {
      name: "Nusrat Jahan".to_string(),
      phone: "01700000000".to_string(),
      address: "House 4, Road 7".to_string(),
      city: "Dhaka".to_string(),
    },
    cart_items: items,
    total,
    payment_info: PaymentInfo {
      payment_method: method,
      payment_details,
    },
    shipping_option_id: Some("inside".to_string()),
  }
}

// --- Scripted id source ---

/// Hands out the queued numbers first, then repeats the last one.
pub struct ScriptedIds {
  queue: Mutex<VecDeque<u32>>,
  last: Mutex<u32>,
  pub draws: AtomicUsize,
}

impl ScriptedIds {
  pub fn new(ids: &[u32]) -> Arc<Self> {
    Arc::new(Self {
      queue: Mutex::new(ids.iter().copied().collect()),
      last: Mutex::new(ids.last().copied().unwrap_or(10_000)),
      draws: AtomicUsize::new(0),
    })
  }

  pub fn draw_count(&self) -> usize {
    self.draws.load(Ordering::SeqCst)
  }
}

impl IdSource for ScriptedIds {
  fn draw(&self, _min: u32, _max: u32) -> u32 {
    self.draws.fetch_add(1, Ordering::SeqCst);
    match self.queue.lock().pop_front() {
      Some(n) => {
        *self.last.lock() = n;
        n
      }
      None => *self.last.lock(),
    }
  }
}

// --- Store wrappers ---

/// Claims every identifier is free, so the only uniqueness check left is the
/// write-time one. Simulates losing the check-then-write race.
pub struct RacingStore {
  pub inner: MemoryStore,
}

#[async_trait]
impl OrderStore for RacingStore {
  async fn insert_order(&self, order: &Order) -> StoreResult<()> {
    self.inner.insert_order(order).await
  }

  async fn order_id_exists(&self, _order_id: &str) -> StoreResult<bool> {
    Ok(false)
  }

  async fn find_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
    self.inner.find_order(id).await
  }

  async fn find_order_by_order_id(&self, order_id: &str) -> StoreResult<Option<Order>> {
    self.inner.find_order_by_order_id(order_id).await
  }

  async fn list_orders(&self) -> StoreResult<Vec<Order>> {
    self.inner.list_orders().await
  }

  async fn update_order_status(&self, id: Uuid, status: OrderStatus, at: DateTime<Utc>) -> StoreResult<Option<Order>> {
    self.inner.update_order_status(id, status, at).await
  }

  async fn delete_order(&self, id: Uuid) -> StoreResult<bool> {
    self.inner.delete_order(id).await
  }
}

/// A store whose every call fails as if the database were unreachable.
pub struct UnreachableStore {
  pub inserts: AtomicUsize,
}

impl UnreachableStore {
  pub fn new() -> Self {
    Self {
      inserts: AtomicUsize::new(0),
    }
  }
}

fn unreachable_err() -> StoreError {
  StoreError::from(anyhow!("connection refused"))
}

#[async_trait]
impl OrderStore for UnreachableStore {
  async fn insert_order(&self, _order: &Order) -> StoreResult<()> {
    self.inserts.fetch_add(1, Ordering::SeqCst);
    Err(unreachable_err())
  }

  async fn order_id_exists(&self, _order_id: &str) -> StoreResult<bool> {
    Err(unreachable_err())
  }

  async fn find_order(&self, _id: Uuid) -> StoreResult<Option<Order>> {
    Err(unreachable_err())
  }

  async fn find_order_by_order_id(&self, _order_id: &str) -> StoreResult<Option<Order>> {
    Err(unreachable_err())
  }

  async fn list_orders(&self) -> StoreResult<Vec<Order>> {
    Err(unreachable_err())
  }

  async fn update_order_status(&self, _id: Uuid, _status: OrderStatus, _at: DateTime<Utc>) -> StoreResult<Option<Order>> {
    Err(unreachable_err())
  }

  async fn delete_order(&self, _id: Uuid) -> StoreResult<bool> {
    Err(unreachable_err())
  }
}
