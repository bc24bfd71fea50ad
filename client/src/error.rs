// storefront/client/src/error.rs

use thiserror::Error;

use storefront_core::{CartError, CheckoutError};

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("HTTP error: {0}")]
  Http(#[from] reqwest::Error),

  /// 401 from the server, or an admin call without a session.
  #[error("Authentication required")]
  Unauthorized,

  #[error("Not found: {0}")]
  NotFound(String),

  /// 400 from the server.
  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Server error ({status}): {message}")]
  Server { status: u16, message: String },

  #[error("Invalid response: {0}")]
  InvalidResponse(String),

  #[error("Invalid URL: {0}")]
  InvalidUrl(String),

  #[error(transparent)]
  Cart(#[from] CartError),

  #[error(transparent)]
  Checkout(#[from] CheckoutError),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Cart file error: {0}")]
  Io(#[from] std::io::Error),
}

impl ClientError {
  /// Text suitable for a notification. Server-provided messages are passed through.
  pub fn user_message(&self) -> String {
    match self {
      ClientError::NotFound(m) | ClientError::Validation(m) => m.clone(),
      ClientError::Server { message, .. } => message.clone(),
      ClientError::Cart(e) => e.to_string(),
      ClientError::Checkout(e) => e.to_string(),
      ClientError::Unauthorized => "Please log in again.".to_string(),
      ClientError::Http(_) => "Could not connect to the server.".to_string(),
      ClientError::InvalidResponse(_)
      | ClientError::InvalidUrl(_)
      | ClientError::Serialization(_)
      | ClientError::Io(_) => {
        "Something went wrong.".to_string()
      }
    }
  }
}

pub type ClientResult<T> = Result<T, ClientError>;
