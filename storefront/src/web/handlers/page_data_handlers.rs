// storefront/storefront/src/web/handlers/page_data_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{debug, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::settings_handlers::{public_settings, settings_not_found};

/// Everything the homepage needs in one round trip: public settings plus
/// the new-arrival and trending products in display order.
#[instrument(name = "handler::home_page_data", skip_all)]
pub async fn home_page_data_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let settings = app_state.store.load_settings().await?.ok_or_else(settings_not_found)?;
  let products = app_state.store.featured_products().await?;
  debug!(featured = products.len(), "Homepage bundle assembled.");

  Ok(HttpResponse::Ok().json(json!({
    "settings": public_settings(&settings)?,
    "products": products,
  })))
}
