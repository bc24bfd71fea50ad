// storefront/core/src/store/mod.rs

//! Storage seams for the four document collections.
//!
//! Backends implement one trait per collection; [`Store`] is blanket
//! implemented for anything that covers all four so application state can
//! hold a single `Arc<dyn Store>`.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::{ContactMessage, Order, OrderStatus, Product, Settings};

pub use memory::MemoryStore;

#[async_trait]
pub trait OrderStore: Send + Sync {
  /// Persists a new order. Must fail with `StoreError::DuplicateOrderId` when
  /// another order already carries the same `order_id`.
  async fn insert_order(&self, order: &Order) -> StoreResult<()>;

  async fn order_id_exists(&self, order_id: &str) -> StoreResult<bool>;

  async fn find_order(&self, id: Uuid) -> StoreResult<Option<Order>>;

  async fn find_order_by_order_id(&self, order_id: &str) -> StoreResult<Option<Order>>;

  /// All orders, newest first.
  async fn list_orders(&self) -> StoreResult<Vec<Order>>;

  /// Sets the status of one order, returning the updated document or `None`
  /// when no order has that id.
  async fn update_order_status(&self, id: Uuid, status: OrderStatus, at: DateTime<Utc>) -> StoreResult<Option<Order>>;

  /// Returns `false` when there was nothing to delete.
  async fn delete_order(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
  async fn insert_product(&self, product: &Product) -> StoreResult<()>;

  async fn find_product(&self, id: Uuid) -> StoreResult<Option<Product>>;

  /// Replaces a stored product. Returns `false` when it does not exist.
  async fn replace_product(&self, product: &Product) -> StoreResult<bool>;

  async fn delete_product(&self, id: Uuid) -> StoreResult<bool>;

  /// Full catalog, newest first.
  async fn list_products(&self) -> StoreResult<Vec<Product>>;

  /// New arrivals and trending products, in homepage order.
  async fn featured_products(&self) -> StoreResult<Vec<Product>>;

  async fn query_products(&self, query: &ProductQuery) -> StoreResult<ProductPage>;

  async fn count_products(&self) -> StoreResult<u64>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
  async fn load_settings(&self) -> StoreResult<Option<Settings>>;

  /// Upserts the singleton settings document.
  async fn save_settings(&self, settings: &Settings) -> StoreResult<()>;
}

#[async_trait]
pub trait MessageStore: Send + Sync {
  async fn insert_message(&self, message: &ContactMessage) -> StoreResult<()>;

  /// Newest first.
  async fn list_messages(&self) -> StoreResult<Vec<ContactMessage>>;

  /// Sets the read flag of one message, returning the updated document.
  async fn set_message_read(&self, id: Uuid, is_read: bool) -> StoreResult<Option<ContactMessage>>;

  async fn delete_message(&self, id: Uuid) -> StoreResult<bool>;
}

pub trait Store: OrderStore + ProductStore + SettingsStore + MessageStore {}

impl<T> Store for T where T: OrderStore + ProductStore + SettingsStore + MessageStore {}

/// Admin catalog query: one page of products, optionally filtered by a
/// case-insensitive substring of the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
  pub page: u32,
  pub page_size: u32,
  pub search: Option<String>,
}

impl ProductQuery {
  pub fn new(page: u32, page_size: u32, search: Option<String>) -> Self {
    Self {
      page: page.max(1),
      page_size: page_size.max(1),
      search: search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
    }
  }

  pub fn offset(&self) -> u64 {
    u64::from(self.page - 1) * u64::from(self.page_size)
  }

  pub fn matches(&self, product: &Product) -> bool {
    self.search.as_deref().map_or(true, |needle| product.name_matches(needle))
  }

  /// Cuts one page out of an already sorted, unfiltered product list.
  pub fn paginate(&self, products: Vec<Product>) -> ProductPage {
    let matching: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
    let total = matching.len() as u64;
    let products = matching
      .into_iter()
      .skip(self.offset() as usize)
      .take(self.page_size as usize)
      .collect();
    ProductPage::new(products, self.page, self.page_size, total)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
  pub products: Vec<Product>,
  pub page: u32,
  pub pages: u32,
  pub total: u64,
}

impl ProductPage {
  pub fn new(products: Vec<Product>, page: u32, page_size: u32, total: u64) -> Self {
    let pages = total.div_ceil(u64::from(page_size.max(1)));
    Self {
      products,
      page,
      pages: u32::try_from(pages).unwrap_or(u32::MAX),
      total,
    }
  }
}
