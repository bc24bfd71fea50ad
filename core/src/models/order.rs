// storefront/core/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::cart_item::CartItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
  Pending,
  Confirmed,
  Shipped,
  Delivered,
  Cancelled,
}

impl OrderStatus {
  pub const ALL: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      OrderStatus::Pending => "Pending",
      OrderStatus::Confirmed => "Confirmed",
      OrderStatus::Shipped => "Shipped",
      OrderStatus::Delivered => "Delivered",
      OrderStatus::Cancelled => "Cancelled",
    }
  }

  pub fn is_terminal(self) -> bool {
    matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OrderStatus {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    OrderStatus::ALL
      .into_iter()
      .find(|status| status.as_str() == s)
      .ok_or_else(|| format!("unknown order status '{}'", s))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
  /// Cash on delivery.
  #[serde(rename = "COD")]
  Cod,
  Online,
}

impl fmt::Display for PaymentMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PaymentMethod::Cod => f.write_str("COD"),
      PaymentMethod::Online => f.write_str("Online"),
    }
  }
}

/// Customer-declared record of a manual online payment. Never verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
  /// Number the payment was sent from.
  pub payment_number: String,
  /// Payment service name, e.g. a mobile wallet.
  pub method: String,
  pub amount: i64,
  pub transaction_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub phone: String,
  #[serde(default)]
  pub address: String,
  #[serde(default)]
  pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
  pub payment_method: PaymentMethod,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub payment_details: Option<PaymentDetails>,
}

/// Body of the public order-creation call, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
  pub customer_details: CustomerDetails,
  #[serde(default)]
  pub cart_items: Vec<CartItem>,
  pub total: i64,
  pub payment_info: PaymentInfo,
  /// When present the server re-prices the cart and requires `total` to match.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub shipping_option_id: Option<String>,
}

/// A validated order request. Only `checkout::validate_order_request` builds
/// one, so the cart it carries is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
  pub(crate) customer_name: String,
  pub(crate) phone: String,
  pub(crate) address: String,
  pub(crate) city: String,
  pub(crate) cart_items: Vec<CartItem>,
  pub(crate) total: i64,
  pub(crate) payment_method: PaymentMethod,
  pub(crate) payment_details: Option<PaymentDetails>,
}

impl OrderDraft {
  pub fn cart_items(&self) -> &[CartItem] {
    &self.cart_items
  }

  pub fn total(&self) -> i64 {
    self.total
  }

  pub fn payment_method(&self) -> PaymentMethod {
    self.payment_method
  }

  /// Stamps identifiers and creation time onto the draft. New orders are `Pending`.
  pub fn into_order(self, id: Uuid, order_id: String, now: DateTime<Utc>) -> Order {
    Order {
      id,
      order_id,
      customer_name: self.customer_name,
      phone: self.phone,
      address: self.address,
      city: self.city,
      cart_items: self.cart_items,
      total: self.total,
      payment_method: self.payment_method,
      payment_details: self.payment_details,
      status: OrderStatus::Pending,
      date: now.format("%Y-%m-%d").to_string(),
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  /// Internal store identifier.
  pub id: Uuid,
  /// Human-facing 5-7 digit identifier, unique among orders.
  pub order_id: String,
  pub customer_name: String,
  pub phone: String,
  pub address: String,
  #[serde(default)]
  pub city: String,
  pub cart_items: Vec<CartItem>,
  pub total: i64,
  pub payment_method: PaymentMethod,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub payment_details: Option<PaymentDetails>,
  pub status: OrderStatus,
  /// Calendar date of creation, `YYYY-MM-DD`.
  pub date: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Order {
  pub fn subtotal(&self) -> i64 {
    crate::pricing::subtotal(&self.cart_items)
  }
}
