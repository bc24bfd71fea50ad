// storefront/storefront/src/state.rs
use crate::config::AppConfig;
use crate::errors::Result;
use crate::pipelines::{self, AppPipelines};
use crate::services::SessionRegistry;
use std::sync::Arc;
use storefront_core::{OrderIdAllocator, OrderLifecycle, Store};

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn Store>,
  pub lifecycle: Arc<OrderLifecycle>,
  pub sessions: Arc<SessionRegistry>,
  pub pipelines: Arc<AppPipelines>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Result<Self> {
    let lifecycle = OrderLifecycle::new(OrderIdAllocator::new(), config.order_transition_policy);
    Self::with_lifecycle(config, store, lifecycle)
  }

  pub fn with_lifecycle(config: AppConfig, store: Arc<dyn Store>, lifecycle: OrderLifecycle) -> Result<Self> {
    let sessions = SessionRegistry::new(chrono::Duration::hours(config.admin_token_ttl_hours));
    let pipelines = pipelines::build_all_pipelines()?;
    Ok(Self {
      store,
      lifecycle: Arc::new(lifecycle),
      sessions: Arc::new(sessions),
      pipelines: Arc::new(pipelines),
      config: Arc::new(config),
    })
  }
}
