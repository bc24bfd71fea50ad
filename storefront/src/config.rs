// storefront/storefront/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use storefront_core::TransitionPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  Postgres,
  /// Process-local store; data is lost on restart.
  Memory,
}

impl FromStr for StoreBackend {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
      "memory" => Ok(StoreBackend::Memory),
      other => Err(format!("unknown store backend '{}'", other)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Text,
  Json,
}

impl FromStr for LogFormat {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "text" => Ok(LogFormat::Text),
      "json" => Ok(LogFormat::Json),
      other => Err(format!("unknown log format '{}'", other)),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub store_backend: StoreBackend,
  /// Required when `store_backend` is Postgres.
  pub database_url: Option<String>,
  pub database_max_connections: u32,

  pub seed_db: bool,
  pub seed_admin_email: String,
  pub seed_admin_password: String,

  pub admin_token_ttl_hours: i64,
  pub order_transition_policy: TransitionPolicy,
  pub admin_products_page_size: u32,
  pub json_payload_limit_bytes: usize,
  pub log_format: LogFormat,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the configuration from any variable source.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| {
      lookup(var_name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };
    let or_default = |var_name: &str, default: &str| get_env(var_name).unwrap_or_else(|_| default.to_string());

    let server_host = or_default("SERVER_HOST", "127.0.0.1");
    let server_port = parse_var("SERVER_PORT", &or_default("SERVER_PORT", "8080"))?;
    let store_backend: StoreBackend = parse_var("STORE_BACKEND", &or_default("STORE_BACKEND", "postgres"))?;
    let database_url = match store_backend {
      StoreBackend::Postgres => Some(get_env("DATABASE_URL")?),
      StoreBackend::Memory => get_env("DATABASE_URL").ok(),
    };
    let database_max_connections = parse_var("DATABASE_MAX_CONNECTIONS", &or_default("DATABASE_MAX_CONNECTIONS", "5"))?;

    let seed_db = parse_var("SEED_DB", &or_default("SEED_DB", "false"))?;
    let seed_admin_email = or_default("SEED_ADMIN_EMAIL", "admin@example.com");
    let seed_admin_password = or_default("SEED_ADMIN_PASSWORD", "change-me");

    let admin_token_ttl_hours: i64 = parse_var("ADMIN_TOKEN_TTL_HOURS", &or_default("ADMIN_TOKEN_TTL_HOURS", "24"))?;
    if admin_token_ttl_hours <= 0 {
      return Err(AppError::Config("ADMIN_TOKEN_TTL_HOURS must be positive".to_string()));
    }
    let order_transition_policy = parse_var("ORDER_TRANSITION_POLICY", &or_default("ORDER_TRANSITION_POLICY", "unrestricted"))?;
    let admin_products_page_size: u32 = parse_var("ADMIN_PRODUCTS_PAGE_SIZE", &or_default("ADMIN_PRODUCTS_PAGE_SIZE", "10"))?;
    if admin_products_page_size == 0 {
      return Err(AppError::Config("ADMIN_PRODUCTS_PAGE_SIZE must be at least 1".to_string()));
    }
    let json_payload_limit_bytes = parse_var("JSON_PAYLOAD_LIMIT_BYTES", &or_default("JSON_PAYLOAD_LIMIT_BYTES", "52428800"))?;
    let log_format = parse_var("LOG_FORMAT", &or_default("LOG_FORMAT", "text"))?;

    // Never log DATABASE_URL or the seed password.
    tracing::info!(
      backend = ?store_backend,
      policy = %order_transition_policy,
      seed_db,
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      store_backend,
      database_url,
      database_max_connections,
      seed_db,
      seed_admin_email,
      seed_admin_password,
      admin_token_ttl_hours,
      order_transition_policy,
      admin_products_page_size,
      json_payload_limit_bytes,
      log_format,
    })
  }

  pub fn server_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn parse_var<T>(var_name: &str, raw: &str) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .trim()
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", var_name, raw, e)))
}
