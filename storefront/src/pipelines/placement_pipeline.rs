// storefront/storefront/src/pipelines/placement_pipeline.rs
use crate::errors::AppError;
use crate::pipelines::contexts::PlacementCtxData;
use storefront_core::models::Settings;
use storefront_core::{validate_order_request, CheckoutOptions, ContextData, Pipeline, PipelineControl};
use tracing::{debug, info, warn};

pub const PLACEMENT_PIPELINE: &str = "order_placement";

/// Builds the public order placement pipeline:
/// load the checkout options, validate the request, allocate an order
/// identifier and persist the order.
pub fn build_placement_pipeline() -> Result<Pipeline<PlacementCtxData, AppError>, AppError> {
  let mut p = Pipeline::<PlacementCtxData, AppError>::new(
    PLACEMENT_PIPELINE,
    &[
      ("load_checkout_settings", false),
      ("validate_order_request", false),
      ("allocate_and_persist_order", false),
    ],
  );

  // Step 1: Current payment toggles and shipping options.
  p.on_root("load_checkout_settings", |ctx_data: ContextData<PlacementCtxData>| async move {
    let store = ctx_data.read().store.clone();

    let settings = match store.load_settings().await? {
      Some(settings) => settings,
      None => {
        warn!("No settings document found; placing order with default checkout options.");
        Settings::default()
      }
    };
    let options = CheckoutOptions::from_settings(&settings);
    debug!(
      shipping_options = options.shipping_options.len(),
      cod = options.cod_enabled,
      online = options.online_payment_enabled,
      "Checkout options loaded."
    );

    ctx_data.write().checkout_options = Some(options);
    Ok::<_, AppError>(PipelineControl::Continue)
  })?;

  // Step 2: Validate the request into a draft. Nothing has been written yet.
  p.on_root("validate_order_request", |ctx_data: ContextData<PlacementCtxData>| async move {
    let (request, options) = {
      let mut guard = ctx_data.write();
      (guard.request.take(), guard.checkout_options.clone())
    };
    let request = request.ok_or_else(|| AppError::Internal("Order request missing from placement context.".to_string()))?;
    let options =
      options.ok_or_else(|| AppError::Internal("Checkout options missing from placement context.".to_string()))?;

    let draft = validate_order_request(request, &options).map_err(|e| {
      warn!(error = %e, "Order request rejected.");
      AppError::Checkout(e)
    })?;

    ctx_data.write().draft = Some(draft);
    Ok::<_, AppError>(PipelineControl::Continue)
  })?;

  // Step 3: Allocate a unique order identifier and write the order.
  p.on_root("allocate_and_persist_order", |ctx_data: ContextData<PlacementCtxData>| async move {
    let (store, lifecycle, draft) = {
      let mut guard = ctx_data.write();
      (guard.store.clone(), guard.lifecycle.clone(), guard.draft.take())
    };
    let draft = draft.ok_or_else(|| AppError::Internal("Order draft missing from placement context.".to_string()))?;

    let order = lifecycle.place(&*store, draft).await?;
    info!(order_id = %order.order_id, total = order.total, method = %order.payment_method, "Order placed.");

    ctx_data.write().created_order = Some(order);
    Ok::<_, AppError>(PipelineControl::Continue)
  })?;

  Ok(p)
}
