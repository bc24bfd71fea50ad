// storefront/storefront/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::pipelines::contexts::PlacementCtxData;
use crate::state::AppState;
use crate::web::extractors::AdminAuth;
use storefront_core::models::{OrderRequest, OrderStatus};
use storefront_core::{ContextData, PipelineResult};

#[derive(Deserialize, Debug)]
pub struct StatusPayload {
  pub status: String,
}

#[instrument(name = "handler::list_orders", skip_all)]
pub async fn list_orders_handler(_admin: AdminAuth, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let orders = app_state.lifecycle.list(&*app_state.store).await?;
  Ok(HttpResponse::Ok().json(orders))
}

/// Public lookup by either the 5-7 digit order id or the internal id.
#[instrument(name = "handler::get_order", skip(app_state, path), fields(reference = %path.as_str()))]
pub async fn get_order_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
  let order = app_state.lifecycle.find(&*app_state.store, &path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(order))
}

#[instrument(name = "handler::create_order", skip_all, fields(items = req_payload.cart_items.len()))]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<OrderRequest>,
) -> Result<HttpResponse, AppError> {
  let placement_ctx = ContextData::new(PlacementCtxData::new(&app_state, req_payload.into_inner()));

  match app_state.pipelines.placement.run(placement_ctx.clone()).await? {
    PipelineResult::Completed => {
      let order = placement_ctx.write().created_order.take().ok_or_else(|| {
        warn!("Placement pipeline completed but no order was recorded.");
        AppError::Internal("Order placement completed without an order.".to_string())
      })?;
      Ok(HttpResponse::Created().json(order))
    }
    PipelineResult::Stopped => {
      warn!("Placement pipeline was stopped by a handler.");
      Err(AppError::PipelineHaltedByHandler)
    }
  }
}

#[instrument(name = "handler::update_order_status", skip(_admin, app_state, req_payload), fields(id = %path.as_str()))]
pub async fn update_order_status_handler(
  _admin: AdminAuth,
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  req_payload: web::Json<StatusPayload>,
) -> Result<HttpResponse, AppError> {
  let status: OrderStatus = req_payload
    .status
    .parse()
    .map_err(|_| AppError::Validation(format!("Invalid order status '{}'", req_payload.status)))?;

  let order = app_state
    .lifecycle
    .update_status(&*app_state.store, &path.into_inner(), status)
    .await?;
  info!(order_id = %order.order_id, status = %order.status, "Order status updated.");
  Ok(HttpResponse::Ok().json(order))
}

#[instrument(name = "handler::delete_order", skip(_admin, app_state), fields(id = %path.as_str()))]
pub async fn delete_order_handler(
  _admin: AdminAuth,
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  app_state.lifecycle.delete(&*app_state.store, &path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Order removed" })))
}
