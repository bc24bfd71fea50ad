// storefront/core/src/models/message.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A message left through the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub message: String,
  pub date: String,
  #[serde(default)]
  pub is_read: bool,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageInput {
  pub name: String,
  pub email: String,
  pub message: String,
}

impl ContactMessageInput {
  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.name.trim().is_empty() {
      return Err(ValidationError::InvalidField { field: "name", reason: "is required" });
    }
    if !self.email.contains('@') {
      return Err(ValidationError::InvalidField { field: "email", reason: "must be an email address" });
    }
    if self.message.trim().is_empty() {
      return Err(ValidationError::InvalidField { field: "message", reason: "is required" });
    }
    Ok(())
  }

  pub fn into_message(self, id: Uuid, now: DateTime<Utc>) -> ContactMessage {
    ContactMessage {
      id,
      name: self.name.trim().to_string(),
      email: self.email.trim().to_string(),
      message: self.message,
      date: now.format("%Y-%m-%d").to_string(),
      is_read: false,
      created_at: now,
    }
  }
}
