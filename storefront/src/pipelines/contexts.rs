// storefront/storefront/src/pipelines/contexts.rs

//! Data the request pipelines operate on. Handlers receive these wrapped in
//! `storefront_core::ContextData`.

use crate::services::SessionRegistry;
use crate::state::AppState;
use std::sync::Arc;
use storefront_core::models::{Order, OrderDraft, OrderRequest};
use storefront_core::{CheckoutOptions, OrderLifecycle, Store};

/// Order placement: request in, persisted order out.
#[derive(Clone)]
pub struct PlacementCtxData {
  pub store: Arc<dyn Store>,
  pub lifecycle: Arc<OrderLifecycle>,
  /// Taken by the validation step.
  pub request: Option<OrderRequest>,
  pub checkout_options: Option<CheckoutOptions>,
  /// Taken by the persistence step.
  pub draft: Option<OrderDraft>,
  pub created_order: Option<Order>,
}

impl PlacementCtxData {
  pub fn new(state: &AppState, request: OrderRequest) -> Self {
    Self {
      store: state.store.clone(),
      lifecycle: state.lifecycle.clone(),
      request: Some(request),
      checkout_options: None,
      draft: None,
      created_order: None,
    }
  }
}

/// Admin sign-in against the credential in the settings document.
#[derive(Clone)]
pub struct SigninCtxData {
  pub store: Arc<dyn Store>,
  pub sessions: Arc<SessionRegistry>,
  pub email: String,
  pub password: String,
  /// Held only between fetching and verifying.
  pub stored_hash: Option<String>,
  pub session_token: Option<String>,
}

impl SigninCtxData {
  pub fn new(state: &AppState, email: String, password: String) -> Self {
    Self {
      store: state.store.clone(),
      sessions: state.sessions.clone(),
      email,
      password,
      stored_hash: None,
      session_token: None,
    }
  }
}
