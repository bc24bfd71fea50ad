// storefront/core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::models::{OrderStatus, PaymentMethod};

/// Failures reported by a document store backend.
#[derive(Debug, Error)]
pub enum StoreError {
  /// The unique index on the human-facing order identifier rejected a write.
  /// The allocator treats this as a collision and draws again.
  #[error("Order identifier '{order_id}' is already taken")]
  DuplicateOrderId { order_id: String },

  #[error("Document store operation failed. Source: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },
}

impl From<AnyhowError> for StoreError {
  fn from(err: AnyhowError) -> Self {
    StoreError::Backend { source: err }
  }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Rejections raised while mutating a cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
  #[error("Please select a size.")]
  MissingSize,

  #[error("Size '{size}' is not offered for {product_name}.")]
  UnknownSize { product_name: String, size: String },

  #[error("Quantity must be a positive number.")]
  InvalidQuantity,
}

/// Rejections raised while validating or pricing a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
  #[error("Cart is empty")]
  EmptyCart,

  #[error("Missing required field: {field}")]
  MissingField { field: &'static str },

  #[error("Cart item {index} is invalid: {reason}")]
  InvalidCartItem { index: usize, reason: &'static str },

  #[error("No shipping method is available")]
  NoShippingOption,

  #[error("Unknown shipping option '{id}'")]
  UnknownShippingOption { id: String },

  #[error("No payment method is available")]
  NoPaymentMethod,

  #[error("Payment method {method} is not available")]
  PaymentMethodUnavailable { method: PaymentMethod },

  #[error("Online payment requires the sending number, method and transaction id")]
  MissingPaymentDetails,

  #[error("Submitted total {submitted} does not match the payable amount {expected}")]
  TotalMismatch { expected: i64, submitted: i64 },

  #[error("Submitted total {submitted} is below the cart subtotal {subtotal}")]
  TotalBelowSubtotal { subtotal: i64, submitted: i64 },
}

/// Rejections for admin-submitted documents (products, settings, contact messages).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Field '{field}' {reason}")]
  InvalidField { field: &'static str, reason: &'static str },

  #[error("Malformed document: {0}")]
  Malformed(String),
}

/// Failures of the order lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
  /// Deliberately carries no detail about which lookup branch missed.
  #[error("Order not found")]
  NotFound,

  #[error("Order status cannot move from {from} to {to}")]
  InvalidTransition { from: OrderStatus, to: OrderStatus },

  #[error(transparent)]
  Checkout(#[from] CheckoutError),

  #[error(transparent)]
  Store(#[from] StoreError),
}

/// Setup and execution errors raised by the step pipeline itself.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },
}
