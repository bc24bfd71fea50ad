// storefront/storefront/src/lib.rs

//! The storefront HTTP server: REST handlers, request pipelines and the
//! Postgres document store behind `storefront_core`.

pub mod config;
pub mod db;
pub mod errors;
pub mod pipelines;
pub mod seed;
pub mod services;
pub mod state;
pub mod web;

pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use state::AppState;
