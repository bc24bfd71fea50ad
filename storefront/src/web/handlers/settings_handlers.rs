// storefront/storefront/src/web/handlers/settings_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::services::auth_service;
use crate::state::AppState;
use crate::web::extractors::AdminAuth;
use storefront_core::models::Settings;

pub(crate) fn settings_not_found() -> AppError {
  AppError::NotFound("Settings not found".to_string())
}

pub(crate) fn public_settings(settings: &Settings) -> Result<Value, AppError> {
  settings
    .to_public_json()
    .map_err(|e| AppError::Internal(format!("Failed to render settings: {}", e)))
}

#[instrument(name = "handler::get_settings", skip_all)]
pub async fn get_settings_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let settings = app_state.store.load_settings().await?.ok_or_else(settings_not_found)?;
  Ok(HttpResponse::Ok().json(public_settings(&settings)?))
}

/// Merges a partial settings document into the stored one.
#[instrument(name = "handler::update_settings", skip_all, fields(admin = %admin.email))]
pub async fn update_settings_handler(
  admin: AdminAuth,
  app_state: web::Data<AppState>,
  req_payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let current = match app_state.store.load_settings().await? {
    Some(settings) => settings,
    None => {
      warn!("Updating settings with no stored document; starting from defaults.");
      Settings::default()
    }
  };

  let update = current.merge_patch(req_payload.into_inner())?;
  let mut settings = update.settings;
  if let Some(password) = update.new_admin_password {
    settings.admin_password = auth_service::hash_password(&password)?;
    info!("Admin password changed.");
  }

  app_state.store.save_settings(&settings).await?;
  info!("Settings updated.");
  Ok(HttpResponse::Ok().json(public_settings(&settings)?))
}
