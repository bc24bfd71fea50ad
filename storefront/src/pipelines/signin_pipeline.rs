// storefront/storefront/src/pipelines/signin_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::SigninCtxData;
use crate::services::auth_service;
use storefront_core::{ContextData, Pipeline, PipelineControl};
use tracing::{event, warn, Level};

pub const SIGNIN_PIPELINE: &str = "admin_signin";

const BAD_CREDENTIALS: &str = "Invalid email or password.";

/// Builds the admin sign-in pipeline.
pub fn build_signin_pipeline() -> Result<Pipeline<SigninCtxData, AppError>, AppError> {
  let mut signin_p = Pipeline::<SigninCtxData, AppError>::new(
    SIGNIN_PIPELINE,
    &[
      ("validate_signin_input", false),
      ("fetch_admin_credentials", false),
      ("verify_admin_password", false),
      ("issue_session_token", false),
    ],
  );

  // Step 1: Validate input
  signin_p.on_root("validate_signin_input", |ctx_data: ContextData<SigninCtxData>| async move {
    let (email_val, password_is_empty) = {
      let guard = ctx_data.read();
      (guard.email.trim().to_string(), guard.password.is_empty())
    };

    if email_val.is_empty() || !email_val.contains('@') {
      warn!("Invalid email format provided for sign-in.");
      return Err(AppError::Validation("Valid email is required.".to_string()));
    }
    if password_is_empty {
      warn!("Empty password provided for sign-in.");
      return Err(AppError::Validation("Password is required.".to_string()));
    }
    Ok(PipelineControl::Continue)
  })?;

  // Step 2: The single admin credential lives in the settings document.
  signin_p.on_root("fetch_admin_credentials", |ctx_data: ContextData<SigninCtxData>| async move {
    let (email_val, store) = {
      let guard = ctx_data.read();
      (guard.email.trim().to_string(), guard.store.clone())
    };

    let settings = store.load_settings().await?.ok_or_else(|| {
      event!(Level::ERROR, "Sign-in attempted before settings were created.");
      AppError::Auth(BAD_CREDENTIALS.to_string())
    })?;

    if !settings.admin_email.trim().eq_ignore_ascii_case(&email_val) {
      warn!("Sign-in attempted with an unknown admin email.");
      return Err(AppError::Auth(BAD_CREDENTIALS.to_string()));
    }

    ctx_data.write().stored_hash = Some(settings.admin_password);
    Ok::<_, AppError>(PipelineControl::Continue)
  })?;

  // Step 3: Verify password
  signin_p.on_root("verify_admin_password", |ctx_data: ContextData<SigninCtxData>| async move {
    let (stored_hash, password_val) = {
      let mut guard = ctx_data.write();
      (guard.stored_hash.take(), guard.password.clone())
    };
    let stored_hash = stored_hash
      .ok_or_else(|| AppError::Internal("Password hash unexpectedly missing for verification.".to_string()))?;

    if auth_service::verify_password(&stored_hash, &password_val)? {
      event!(Level::INFO, "Admin password verified.");
      Ok(PipelineControl::Continue)
    } else {
      warn!("Admin password mismatch.");
      Err(AppError::Auth(BAD_CREDENTIALS.to_string()))
    }
  })?;

  // Step 4: Issue session token
  signin_p.on_root("issue_session_token", |ctx_data: ContextData<SigninCtxData>| async move {
    let (email_val, sessions) = {
      let guard = ctx_data.read();
      (guard.email.trim().to_string(), guard.sessions.clone())
    };

    let token = sessions.issue(&email_val);
    ctx_data.write().session_token = Some(token);
    Ok::<_, AppError>(PipelineControl::Continue)
  })?;

  Ok(signin_p)
}
