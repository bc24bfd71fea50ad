// storefront/storefront/src/services/session_service.rs

//! In-process registry of admin sessions.
//!
//! Tokens are opaque random strings. They live only in this process, so a
//! restart signs every admin out.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
  pub email: String,
  pub expires_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct SessionRegistry {
  ttl: Duration,
  sessions: RwLock<HashMap<String, AdminSession>>,
}

impl SessionRegistry {
  pub fn new(ttl: Duration) -> Self {
    Self {
      ttl,
      sessions: RwLock::new(HashMap::new()),
    }
  }

  pub fn issue(&self, email: &str) -> String {
    self.issue_at(email, Utc::now())
  }

  pub fn issue_at(&self, email: &str, now: DateTime<Utc>) -> String {
    let token = Uuid::new_v4().simple().to_string();
    let mut sessions = self.sessions.write();
    sessions.retain(|_, s| s.expires_at > now);
    sessions.insert(
      token.clone(),
      AdminSession {
        email: email.to_string(),
        expires_at: now + self.ttl,
      },
    );
    info!(active_sessions = sessions.len(), "Admin session issued.");
    token
  }

  pub fn validate(&self, token: &str) -> Option<AdminSession> {
    self.validate_at(token, Utc::now())
  }

  /// Returns the live session for `token`. Expired sessions are dropped.
  pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Option<AdminSession> {
    let session = self.sessions.read().get(token).cloned()?;
    if session.expires_at > now {
      return Some(session);
    }
    debug!("Admin session expired.");
    self.sessions.write().remove(token);
    None
  }

  pub fn revoke(&self, token: &str) -> bool {
    self.sessions.write().remove(token).is_some()
  }
}
