// storefront/storefront/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AdminAuth;
use storefront_core::models::ProductInput;
use storefront_core::ProductQuery;

#[derive(Deserialize, Debug)]
pub struct AdminProductsQuery {
  pub page: Option<u32>,
  pub search: Option<String>,
}

fn product_not_found() -> AppError {
  AppError::NotFound("Product not found".to_string())
}

/// Malformed ids read the same as missing ones.
fn parse_product_id(raw: &str) -> Result<Uuid, AppError> {
  Uuid::parse_str(raw).map_err(|_| product_not_found())
}

#[instrument(name = "handler::list_products", skip_all)]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.store.list_products().await?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_str()))]
pub async fn get_product_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
  let id = parse_product_id(&path)?;
  let product = app_state.store.find_product(id).await?.ok_or_else(product_not_found)?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::admin_products", skip(_admin, app_state))]
pub async fn admin_products_handler(
  _admin: AdminAuth,
  app_state: web::Data<AppState>,
  query_params: web::Query<AdminProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let AdminProductsQuery { page, search } = query_params.into_inner();
  let query = ProductQuery::new(page.unwrap_or(1), app_state.config.admin_products_page_size, search);
  let page = app_state.store.query_products(&query).await?;
  Ok(HttpResponse::Ok().json(page))
}

#[instrument(name = "handler::create_product", skip_all, fields(name = %req_payload.name))]
pub async fn create_product_handler(
  _admin: AdminAuth,
  app_state: web::Data<AppState>,
  req_payload: web::Json<ProductInput>,
) -> Result<HttpResponse, AppError> {
  let input = req_payload.into_inner();
  input.validate()?;

  let product = input.into_product(Uuid::new_v4(), Utc::now());
  app_state.store.insert_product(&product).await?;
  info!(product_id = %product.id, "Product created.");
  Ok(HttpResponse::Created().json(product))
}

#[instrument(name = "handler::update_product", skip(_admin, app_state, req_payload), fields(product_id = %path.as_str()))]
pub async fn update_product_handler(
  _admin: AdminAuth,
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  req_payload: web::Json<ProductInput>,
) -> Result<HttpResponse, AppError> {
  let id = parse_product_id(&path)?;
  let input = req_payload.into_inner();
  input.validate()?;

  let existing = app_state.store.find_product(id).await?.ok_or_else(product_not_found)?;
  let updated = input.apply_to(&existing, Utc::now());
  if !app_state.store.replace_product(&updated).await? {
    return Err(product_not_found());
  }
  Ok(HttpResponse::Ok().json(updated))
}

#[instrument(name = "handler::delete_product", skip(_admin, app_state), fields(product_id = %path.as_str()))]
pub async fn delete_product_handler(
  _admin: AdminAuth,
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let id = parse_product_id(&path)?;
  if !app_state.store.delete_product(id).await? {
    return Err(product_not_found());
  }
  info!("Product removed.");
  Ok(HttpResponse::Ok().json(json!({ "message": "Product removed" })))
}
