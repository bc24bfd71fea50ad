// storefront/client/src/config.rs

use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Where the client talks to and where it keeps the cart.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Server origin, e.g. `http://localhost:8080`. Routes are under `/api`.
  pub base_url: String,

  pub timeout: Duration,

  /// File holding the persisted cart. `None` keeps the cart in memory only.
  pub cart_path: Option<PathBuf>,
}

impl ClientConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      timeout: Duration::from_secs(30),
      cart_path: None,
    }
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  pub fn with_cart_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.cart_path = Some(path.into());
    self
  }

  pub(crate) fn api_url(&self, path: &str) -> String {
    format!("{}/api/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
  }

  /// `path` followed by one percent-encoded segment taken from user input.
  pub(crate) fn api_url_with_segment(&self, path: &str, segment: &str) -> ClientResult<Url> {
    let mut url = Url::parse(&self.api_url(path)).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
    url
      .path_segments_mut()
      .map_err(|()| ClientError::InvalidUrl(self.base_url.clone()))?
      .push(segment);
    Ok(url)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn api_url_joins_without_double_slashes() {
    let config = ClientConfig::new("http://localhost:8080/");
    assert_eq!(config.api_url("/orders"), "http://localhost:8080/api/orders");
    assert_eq!(config.api_url("page-data/home"), "http://localhost:8080/api/page-data/home");
  }

  #[test]
  fn user_segment_cannot_escape_its_route() {
    let config = ClientConfig::new("http://localhost:8080");
    let url = |segment: &str| config.api_url_with_segment("orders", segment).unwrap().to_string();
    assert_eq!(url("48213"), "http://localhost:8080/api/orders/48213");
    assert_eq!(url("../products"), "http://localhost:8080/api/orders/..%2Fproducts");
    assert_eq!(url("123?x"), "http://localhost:8080/api/orders/123%3Fx");
    assert_eq!(url("12#3"), "http://localhost:8080/api/orders/12%233");
  }

  #[test]
  fn unparseable_base_url_is_reported() {
    let config = ClientConfig::new("not a url");
    assert!(matches!(
      config.api_url_with_segment("orders", "1"),
      Err(ClientError::InvalidUrl(_))
    ));
  }
}
