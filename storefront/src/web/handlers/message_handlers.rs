// storefront/storefront/src/web/handlers/message_handlers.rs

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AdminAuth;
use storefront_core::models::ContactMessageInput;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReadFlagPayload {
  #[serde(default = "default_read")]
  pub is_read: bool,
}

fn default_read() -> bool {
  true
}

fn message_not_found() -> AppError {
  AppError::NotFound("Message not found".to_string())
}

fn parse_message_id(raw: &str) -> Result<Uuid, AppError> {
  Uuid::parse_str(raw).map_err(|_| message_not_found())
}

#[instrument(name = "handler::send_message", skip_all)]
pub async fn send_message_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<ContactMessageInput>,
) -> Result<HttpResponse, AppError> {
  let input = req_payload.into_inner();
  input.validate()?;

  let message = input.into_message(Uuid::new_v4(), Utc::now());
  app_state.store.insert_message(&message).await?;
  info!(message_id = %message.id, "Contact message received.");
  Ok(HttpResponse::Created().json(message))
}

#[instrument(name = "handler::list_messages", skip_all)]
pub async fn list_messages_handler(_admin: AdminAuth, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let messages = app_state.store.list_messages().await?;
  Ok(HttpResponse::Ok().json(messages))
}

#[instrument(name = "handler::set_message_read", skip(_admin, app_state, req_payload), fields(message_id = %path.as_str()))]
pub async fn set_message_read_handler(
  _admin: AdminAuth,
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  req_payload: Option<web::Json<ReadFlagPayload>>,
) -> Result<HttpResponse, AppError> {
  let id = parse_message_id(&path)?;
  let is_read = req_payload.map_or(true, |payload| payload.is_read);

  let message = app_state
    .store
    .set_message_read(id, is_read)
    .await?
    .ok_or_else(message_not_found)?;
  Ok(HttpResponse::Ok().json(message))
}

#[instrument(name = "handler::delete_message", skip(_admin, app_state), fields(message_id = %path.as_str()))]
pub async fn delete_message_handler(
  _admin: AdminAuth,
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let id = parse_message_id(&path)?;
  if !app_state.store.delete_message(id).await? {
    return Err(message_not_found());
  }
  Ok(HttpResponse::Ok().json(json!({ "message": "Message removed" })))
}
