// storefront/core/src/lifecycle.rs

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::checkout::validate_order_request;
use crate::error::LifecycleError;
use crate::models::{Order, OrderDraft, OrderRequest, OrderStatus};
use crate::order_id::{OrderIdAllocator, OrderRef};
use crate::pricing::CheckoutOptions;
use crate::store::OrderStore;

/// Which status changes an admin may make.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
  /// Any status may be set from any status, so mistakes can be corrected.
  #[default]
  Unrestricted,
  /// Only forward moves along Pending, Confirmed, Shipped, Delivered, plus
  /// cancelling a non-terminal order.
  ForwardOnly,
}

fn forward_targets(from: OrderStatus) -> &'static [OrderStatus] {
  use OrderStatus::*;
  match from {
    Pending => &[Confirmed, Shipped, Delivered, Cancelled],
    Confirmed => &[Shipped, Delivered, Cancelled],
    Shipped => &[Delivered, Cancelled],
    Delivered | Cancelled => &[],
  }
}

impl TransitionPolicy {
  pub fn allows(self, from: OrderStatus, to: OrderStatus) -> bool {
    if from == to {
      return true;
    }
    match self {
      TransitionPolicy::Unrestricted => true,
      TransitionPolicy::ForwardOnly => forward_targets(from).contains(&to),
    }
  }

  pub fn check(self, from: OrderStatus, to: OrderStatus) -> Result<(), LifecycleError> {
    if self.allows(from, to) {
      Ok(())
    } else {
      Err(LifecycleError::InvalidTransition { from, to })
    }
  }
}

impl fmt::Display for TransitionPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TransitionPolicy::Unrestricted => f.write_str("unrestricted"),
      TransitionPolicy::ForwardOnly => f.write_str("forward_only"),
    }
  }
}

impl FromStr for TransitionPolicy {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "unrestricted" => Ok(TransitionPolicy::Unrestricted),
      "forward_only" | "forward-only" => Ok(TransitionPolicy::ForwardOnly),
      other => Err(format!("unknown transition policy '{}'", other)),
    }
  }
}

/// Creates, updates, finds and deletes orders over any [`OrderStore`].
#[derive(Debug, Clone, Default)]
pub struct OrderLifecycle {
  allocator: OrderIdAllocator,
  policy: TransitionPolicy,
}

impl OrderLifecycle {
  pub fn new(allocator: OrderIdAllocator, policy: TransitionPolicy) -> Self {
    Self { allocator, policy }
  }

  pub fn policy(&self) -> TransitionPolicy {
    self.policy
  }

  pub fn allocator(&self) -> &OrderIdAllocator {
    &self.allocator
  }

  /// Validates a public request and places it. Nothing is written when
  /// validation fails.
  pub async fn create<S>(&self, store: &S, request: OrderRequest, options: &CheckoutOptions) -> Result<Order, LifecycleError>
  where
    S: OrderStore + ?Sized,
  {
    let draft = validate_order_request(request, options)?;
    self.place(store, draft).await
  }

  #[instrument(name = "OrderLifecycle::place", skip_all, fields(total = draft.total()))]
  pub async fn place<S>(&self, store: &S, draft: OrderDraft) -> Result<Order, LifecycleError>
  where
    S: OrderStore + ?Sized,
  {
    let order = self.allocator.place(store, draft).await?;
    info!(order_id = %order.order_id, id = %order.id, total = order.total, "Order created");
    Ok(order)
  }

  /// Status changes address orders by internal id only.
  #[instrument(name = "OrderLifecycle::update_status", skip(self, store), fields(policy = %self.policy))]
  pub async fn update_status<S>(&self, store: &S, id: &str, status: OrderStatus) -> Result<Order, LifecycleError>
  where
    S: OrderStore + ?Sized,
  {
    let id = parse_internal(id)?;
    let current = store.find_order(id).await?.ok_or(LifecycleError::NotFound)?;
    self.policy.check(current.status, status)?;
    let updated = store
      .update_order_status(id, status, Utc::now())
      .await?
      .ok_or(LifecycleError::NotFound)?;
    info!(order_id = %updated.order_id, from = %current.status, to = %status, "Order status updated");
    Ok(updated)
  }

  #[instrument(name = "OrderLifecycle::delete", skip(self, store))]
  pub async fn delete<S>(&self, store: &S, id: &str) -> Result<(), LifecycleError>
  where
    S: OrderStore + ?Sized,
  {
    let id = parse_internal(id)?;
    if store.delete_order(id).await? {
      info!(%id, "Order deleted");
      Ok(())
    } else {
      Err(LifecycleError::NotFound)
    }
  }

  /// Looks an order up by its human-facing identifier or by its internal id.
  /// Every kind of miss is the same `NotFound`.
  pub async fn find<S>(&self, store: &S, reference: &str) -> Result<Order, LifecycleError>
  where
    S: OrderStore + ?Sized,
  {
    let found = match OrderRef::parse(reference) {
      Some(OrderRef::OrderId(order_id)) => store.find_order_by_order_id(&order_id).await?,
      Some(OrderRef::Internal(id)) => store.find_order(id).await?,
      None => None,
    };
    found.ok_or(LifecycleError::NotFound)
  }

  pub async fn list<S>(&self, store: &S) -> Result<Vec<Order>, LifecycleError>
  where
    S: OrderStore + ?Sized,
  {
    Ok(store.list_orders().await?)
  }
}

fn parse_internal(id: &str) -> Result<Uuid, LifecycleError> {
  Uuid::parse_str(id.trim()).map_err(|_| LifecycleError::NotFound)
}
