// storefront/storefront/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use storefront_core::{CheckoutError, LifecycleError, PipelineError, StoreError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Checkout rejected: {0}")]
  Checkout(#[from] CheckoutError),

  #[error("Invalid status change: {0}")]
  InvalidTransition(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Store Error: {0}")]
  Store(#[from] StoreError),

  #[error("Pipeline Error: {source}")]
  Workflow {
    #[from]
    source: PipelineError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),

  /// A pipeline stopped cleanly where the request needed it to complete.
  #[error("Pipeline execution was halted by a handler.")]
  PipelineHaltedByHandler,
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl From<ValidationError> for AppError {
  fn from(err: ValidationError) -> Self {
    AppError::Validation(err.to_string())
  }
}

impl From<LifecycleError> for AppError {
  fn from(err: LifecycleError) -> Self {
    match err {
      LifecycleError::NotFound => AppError::NotFound("Order not found".to_string()),
      e @ LifecycleError::InvalidTransition { .. } => AppError::InvalidTransition(e.to_string()),
      LifecycleError::Checkout(e) => AppError::Checkout(e),
      LifecycleError::Store(e) => AppError::Store(e),
    }
  }
}

impl AppError {
  /// The client-facing message. Backend details never leave the server.
  fn public_message(&self) -> String {
    match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::NotFound(m) | AppError::InvalidTransition(m) => m.clone(),
      AppError::Checkout(e) => e.to_string(),
      AppError::Config(_) => "Configuration issue".to_string(),
      AppError::Sqlx(_) | AppError::Store(_) => "Database operation failed".to_string(),
      AppError::Workflow { .. } | AppError::Internal(_) | AppError::PipelineHaltedByHandler => {
        "An internal error occurred".to_string()
      }
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::Checkout(_) | AppError::InvalidTransition(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_)
      | AppError::Sqlx(_)
      | AppError::Store(_)
      | AppError::Workflow { .. }
      | AppError::Internal(_)
      | AppError::PipelineHaltedByHandler => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with error");
    }
    HttpResponse::build(status).json(json!({ "message": self.public_message() }))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use storefront_core::models::OrderStatus;

  #[test]
  fn lifecycle_errors_map_to_http_status() {
    assert_eq!(AppError::from(LifecycleError::NotFound).status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
      AppError::from(LifecycleError::InvalidTransition {
        from: OrderStatus::Delivered,
        to: OrderStatus::Pending
      })
      .status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      AppError::from(LifecycleError::Checkout(CheckoutError::EmptyCart)).status_code(),
      StatusCode::BAD_REQUEST
    );
    let backend = StoreError::from(anyhow::anyhow!("socket closed"));
    let err = AppError::from(LifecycleError::Store(backend));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.public_message(), "Database operation failed");
  }
}
