// storefront/storefront/src/web/extractors.rs

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::errors::AppError;
use crate::state::AppState;

/// An authenticated admin. Taking this as the first handler argument rejects
/// the request with 401 before any body is read.
#[derive(Debug, Clone)]
pub struct AdminAuth {
  pub token: String,
  pub email: String,
}

impl FromRequest for AdminAuth {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(authenticate(req))
  }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
  req
    .headers()
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Bearer ")
    .map(str::trim)
    .filter(|token| !token.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<AdminAuth, AppError> {
  let state = req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Internal("Application state is not registered.".to_string()))?;

  let token = bearer_token(req).ok_or_else(|| AppError::Auth("Not authorized, no token".to_string()))?;
  let session = state.sessions.validate(token).ok_or_else(|| {
    tracing::warn!("Rejected unknown or expired admin token.");
    AppError::Auth("Not authorized, token failed".to_string())
  })?;

  Ok(AdminAuth {
    token: token.to_string(),
    email: session.email,
  })
}
