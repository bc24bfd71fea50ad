// storefront/storefront/src/services/mod.rs

pub mod auth_service;
pub mod session_service;

pub use session_service::{AdminSession, SessionRegistry};
