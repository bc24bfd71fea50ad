// storefront/core/src/order_id.rs

//! Human-facing order identifiers.
//!
//! Identifiers are random decimal numbers drawn from
//! `ORDER_ID_MIN..=ORDER_ID_MAX`, which keeps every one of them 5 to 7 digits
//! long. Uniqueness is enforced twice: a pre-check against the store before
//! writing, and the store's unique index at write time. Either kind of
//! collision leads to a fresh draw; there is no retry limit.

use chrono::Utc;
use rand::Rng;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{Order, OrderDraft};
use crate::store::OrderStore;

pub const ORDER_ID_MIN: u32 = 10_000;
pub const ORDER_ID_MAX: u32 = 9_999_999;

/// Source of candidate identifiers. Production uses [`RandomIdSource`].
pub trait IdSource: Send + Sync {
  /// Returns a number in `min..=max`.
  fn draw(&self, min: u32, max: u32) -> u32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdSource;

impl IdSource for RandomIdSource {
  fn draw(&self, min: u32, max: u32) -> u32 {
    rand::thread_rng().gen_range(min..=max)
  }
}

#[derive(Clone)]
pub struct OrderIdAllocator {
  source: Arc<dyn IdSource>,
  min: u32,
  max: u32,
}

impl fmt::Debug for OrderIdAllocator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("OrderIdAllocator")
      .field("min", &self.min)
      .field("max", &self.max)
      .finish_non_exhaustive()
  }
}

impl Default for OrderIdAllocator {
  fn default() -> Self {
    Self::new()
  }
}

impl OrderIdAllocator {
  pub fn new() -> Self {
    Self::with_source(Arc::new(RandomIdSource))
  }

  pub fn with_source(source: Arc<dyn IdSource>) -> Self {
    Self {
      source,
      min: ORDER_ID_MIN,
      max: ORDER_ID_MAX,
    }
  }

  /// Narrows the draw range. Bounds are clamped into the 5-7 digit range.
  pub fn with_range(mut self, min: u32, max: u32) -> Self {
    let min = min.clamp(ORDER_ID_MIN, ORDER_ID_MAX);
    let max = max.clamp(min, ORDER_ID_MAX);
    self.min = min;
    self.max = max;
    self
  }

  pub fn range(&self) -> (u32, u32) {
    (self.min, self.max)
  }

  pub fn candidate(&self) -> String {
    let n = self.source.draw(self.min, self.max).clamp(self.min, self.max);
    n.to_string()
  }

  /// Draws until the store reports a free identifier.
  #[instrument(name = "OrderIdAllocator::allocate", skip_all, err(Display))]
  pub async fn allocate<S>(&self, store: &S) -> StoreResult<String>
  where
    S: OrderStore + ?Sized,
  {
    let mut attempts: u32 = 0;
    loop {
      attempts += 1;
      let candidate = self.candidate();
      if !store.order_id_exists(&candidate).await? {
        debug!(order_id = %candidate, attempts, "Allocated order identifier");
        return Ok(candidate);
      }
      debug!(order_id = %candidate, attempts, "Order identifier already taken, drawing again");
    }
  }

  /// Allocates an identifier and persists the draft as a new `Pending` order.
  ///
  /// A duplicate-key rejection from the store (another request took the same
  /// identifier between the check and the write) restarts allocation. Any
  /// other store error aborts with nothing written.
  #[instrument(name = "OrderIdAllocator::place", skip_all, err(Display))]
  pub async fn place<S>(&self, store: &S, draft: OrderDraft) -> StoreResult<Order>
  where
    S: OrderStore + ?Sized,
  {
    loop {
      let order_id = self.allocate(store).await?;
      let order = draft.clone().into_order(Uuid::new_v4(), order_id, Utc::now());
      match store.insert_order(&order).await {
        Ok(()) => return Ok(order),
        Err(StoreError::DuplicateOrderId { order_id }) => {
          warn!(%order_id, "Order identifier collided on write, retrying allocation");
        }
        Err(e) => return Err(e),
      }
    }
  }
}

/// `true` for a purely decimal string of 5 to 7 digits.
pub fn is_order_id_shape(s: &str) -> bool {
  (5..=7).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

/// A parsed order reference from a lookup path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRef {
  OrderId(String),
  Internal(Uuid),
}

impl OrderRef {
  /// Digits of the right length are a human-facing identifier, anything else
  /// must be an internal id. `None` means the reference can match nothing.
  pub fn parse(raw: &str) -> Option<OrderRef> {
    let raw = raw.trim();
    if is_order_id_shape(raw) {
      return Some(OrderRef::OrderId(raw.to_string()));
    }
    Uuid::parse_str(raw).ok().map(OrderRef::Internal)
  }
}
