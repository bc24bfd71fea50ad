// storefront/core/src/lib.rs

//! Storefront core: the rules behind placing and managing orders.
//!
//! This crate holds everything that does not depend on a web framework or a
//! database driver:
//!  - Catalog, cart, order, settings and contact message documents.
//!  - The cart value and the pricing engine (shipping is waived for online payments).
//!  - Checkout validation that turns an order request into a draft.
//!  - The random order identifier allocator with collision retry.
//!  - The order lifecycle (create, status transitions, dual lookup, delete).
//!  - Async store traits plus an in-memory backend.
//!  - A small named-step async pipeline used by the server to drive requests.

pub mod cart;
pub mod checkout;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod order_id;
pub mod pipeline;
pub mod pricing;
pub mod store;

pub use crate::cart::{AddOutcome, Cart};
pub use crate::checkout::validate_order_request;
pub use crate::error::{
  CartError, CheckoutError, LifecycleError, PipelineError, StoreError, StoreResult, ValidationError,
};
pub use crate::lifecycle::{OrderLifecycle, TransitionPolicy};
pub use crate::order_id::{
  is_order_id_shape, IdSource, OrderIdAllocator, OrderRef, RandomIdSource, ORDER_ID_MAX, ORDER_ID_MIN,
};
pub use crate::pipeline::{ContextData, Handler, Pipeline, PipelineControl, PipelineResult, StepDef};
pub use crate::pricing::{CheckoutOptions, CheckoutSelection, PriceQuote};
pub use crate::store::{
  MemoryStore, MessageStore, OrderStore, ProductPage, ProductQuery, ProductStore, SettingsStore, Store,
};
