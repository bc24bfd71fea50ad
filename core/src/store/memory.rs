// storefront/core/src/store/memory.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::trace;
use uuid::Uuid;

use super::{MessageStore, OrderStore, ProductQuery, ProductPage, ProductStore, SettingsStore};
use crate::error::{StoreError, StoreResult};
use crate::models::product::{by_display_order, by_recency};
use crate::models::{ContactMessage, Order, OrderStatus, Product, Settings};

#[derive(Debug, Default)]
struct Collections {
  orders: Vec<Order>,
  products: Vec<Product>,
  settings: Option<Settings>,
  messages: Vec<ContactMessage>,
}

/// Process-local store backed by `parking_lot` locks. Cheap to clone; clones
/// share the same collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_settings(settings: Settings) -> Self {
    let store = Self::new();
    store.inner.write().settings = Some(settings);
    store
  }

  pub fn order_count(&self) -> usize {
    self.inner.read().orders.len()
  }
}

#[async_trait]
impl OrderStore for MemoryStore {
  async fn insert_order(&self, order: &Order) -> StoreResult<()> {
    let mut guard = self.inner.write();
    if guard.orders.iter().any(|o| o.order_id == order.order_id) {
      return Err(StoreError::DuplicateOrderId {
        order_id: order.order_id.clone(),
      });
    }
    guard.orders.push(order.clone());
    trace!(order_id = %order.order_id, "Order inserted into memory store");
    Ok(())
  }

  async fn order_id_exists(&self, order_id: &str) -> StoreResult<bool> {
    Ok(self.inner.read().orders.iter().any(|o| o.order_id == order_id))
  }

  async fn find_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
    Ok(self.inner.read().orders.iter().find(|o| o.id == id).cloned())
  }

  async fn find_order_by_order_id(&self, order_id: &str) -> StoreResult<Option<Order>> {
    Ok(self.inner.read().orders.iter().find(|o| o.order_id == order_id).cloned())
  }

  async fn list_orders(&self) -> StoreResult<Vec<Order>> {
    let mut orders = self.inner.read().orders.clone();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(orders)
  }

  async fn update_order_status(&self, id: Uuid, status: OrderStatus, at: DateTime<Utc>) -> StoreResult<Option<Order>> {
    let mut guard = self.inner.write();
    Ok(guard.orders.iter_mut().find(|o| o.id == id).map(|order| {
      order.status = status;
      order.updated_at = at;
      order.clone()
    }))
  }

  async fn delete_order(&self, id: Uuid) -> StoreResult<bool> {
    let mut guard = self.inner.write();
    let before = guard.orders.len();
    guard.orders.retain(|o| o.id != id);
    Ok(guard.orders.len() != before)
  }
}

#[async_trait]
impl ProductStore for MemoryStore {
  async fn insert_product(&self, product: &Product) -> StoreResult<()> {
    self.inner.write().products.push(product.clone());
    Ok(())
  }

  async fn find_product(&self, id: Uuid) -> StoreResult<Option<Product>> {
    Ok(self.inner.read().products.iter().find(|p| p.id == id).cloned())
  }

  async fn replace_product(&self, product: &Product) -> StoreResult<bool> {
    let mut guard = self.inner.write();
    match guard.products.iter_mut().find(|p| p.id == product.id) {
      Some(slot) => {
        *slot = product.clone();
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn delete_product(&self, id: Uuid) -> StoreResult<bool> {
    let mut guard = self.inner.write();
    let before = guard.products.len();
    guard.products.retain(|p| p.id != id);
    Ok(guard.products.len() != before)
  }

  async fn list_products(&self) -> StoreResult<Vec<Product>> {
    let mut products = self.inner.read().products.clone();
    products.sort_by(by_recency);
    Ok(products)
  }

  async fn featured_products(&self) -> StoreResult<Vec<Product>> {
    let mut products: Vec<Product> = self
      .inner
      .read()
      .products
      .iter()
      .filter(|p| p.is_featured())
      .cloned()
      .collect();
    products.sort_by(by_display_order);
    Ok(products)
  }

  async fn query_products(&self, query: &ProductQuery) -> StoreResult<ProductPage> {
    let products = self.list_products().await?;
    Ok(query.paginate(products))
  }

  async fn count_products(&self) -> StoreResult<u64> {
    Ok(self.inner.read().products.len() as u64)
  }
}

#[async_trait]
impl SettingsStore for MemoryStore {
  async fn load_settings(&self) -> StoreResult<Option<Settings>> {
    Ok(self.inner.read().settings.clone())
  }

  async fn save_settings(&self, settings: &Settings) -> StoreResult<()> {
    self.inner.write().settings = Some(settings.clone());
    Ok(())
  }
}

#[async_trait]
impl MessageStore for MemoryStore {
  async fn insert_message(&self, message: &ContactMessage) -> StoreResult<()> {
    self.inner.write().messages.push(message.clone());
    Ok(())
  }

  async fn list_messages(&self) -> StoreResult<Vec<ContactMessage>> {
    let mut messages = self.inner.read().messages.clone();
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(messages)
  }

  async fn set_message_read(&self, id: Uuid, is_read: bool) -> StoreResult<Option<ContactMessage>> {
    let mut guard = self.inner.write();
    Ok(guard.messages.iter_mut().find(|m| m.id == id).map(|message| {
      message.is_read = is_read;
      message.clone()
    }))
  }

  async fn delete_message(&self, id: Uuid) -> StoreResult<bool> {
    let mut guard = self.inner.write();
    let before = guard.messages.len();
    guard.messages.retain(|m| m.id != id);
    Ok(guard.messages.len() != before)
  }
}
