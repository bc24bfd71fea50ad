// storefront/storefront/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::pipelines::contexts::SigninCtxData;
use crate::state::AppState;
use crate::web::extractors::AdminAuth;
use storefront_core::{ContextData, PipelineResult};

#[derive(Deserialize)]
pub struct LoginPayload {
  pub email: String,
  pub password: String,
}

#[instrument(name = "handler::login", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginPayload>,
) -> Result<HttpResponse, AppError> {
  let LoginPayload { email, password } = req_payload.into_inner();
  let signin_ctx = ContextData::new(SigninCtxData::new(&app_state, email, password));

  match app_state.pipelines.signin.run(signin_ctx.clone()).await? {
    PipelineResult::Completed => {
      let token = signin_ctx.read().session_token.clone().ok_or_else(|| {
        warn!("Signin pipeline completed but no token was issued.");
        AppError::Internal("Signin completed without issuing a token.".to_string())
      })?;
      info!("Admin signed in.");
      Ok(HttpResponse::Ok().json(json!({ "token": token })))
    }
    PipelineResult::Stopped => {
      warn!("Signin pipeline was stopped by a handler.");
      Err(AppError::PipelineHaltedByHandler)
    }
  }
}

#[instrument(name = "handler::logout", skip_all, fields(admin = %admin.email))]
pub async fn logout_handler(admin: AdminAuth, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  app_state.sessions.revoke(&admin.token);
  Ok(HttpResponse::Ok().json(json!({ "message": "Logged out" })))
}
