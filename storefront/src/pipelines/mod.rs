// storefront/storefront/src/pipelines/mod.rs

//! The request pipelines of the storefront server.

use crate::errors::AppError;
use storefront_core::Pipeline;

pub mod contexts;
pub mod placement_pipeline;
pub mod signin_pipeline;

use contexts::{PlacementCtxData, SigninCtxData};

pub struct AppPipelines {
  pub placement: Pipeline<PlacementCtxData, AppError>,
  pub signin: Pipeline<SigninCtxData, AppError>,
}

/// Builds every pipeline once at startup.
pub fn build_all_pipelines() -> Result<AppPipelines, AppError> {
  let pipelines = AppPipelines {
    placement: placement_pipeline::build_placement_pipeline()?,
    signin: signin_pipeline::build_signin_pipeline()?,
  };
  tracing::info!(
    placement_steps = pipelines.placement.steps().len(),
    signin_steps = pipelines.signin.steps().len(),
    "Application pipelines built."
  );
  Ok(pipelines)
}
