// storefront/client/src/api.rs

//! Typed calls against the storefront REST API.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use storefront_core::models::{
  ContactMessage, ContactMessageInput, Order, OrderRequest, OrderStatus, Product, ProductInput, Settings,
};
use storefront_core::ProductPage;

/// The homepage bundle: public settings and the featured products.
#[derive(Debug, Clone, Deserialize)]
pub struct HomePageData {
  pub settings: Settings,
  pub products: Vec<Product>,
}

#[derive(Deserialize)]
struct TokenResponse {
  token: String,
}

#[derive(Deserialize)]
struct MessageBody {
  message: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
  client: Client,
  config: ClientConfig,
  token: Option<String>,
}

impl ApiClient {
  pub fn new(config: ClientConfig) -> ClientResult<Self> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self {
      client,
      config,
      token: None,
    })
  }

  pub fn config(&self) -> &ClientConfig {
    &self.config
  }

  pub fn token(&self) -> Option<&str> {
    self.token.as_deref()
  }

  pub fn set_token(&mut self, token: Option<String>) {
    self.token = token;
  }

  pub fn is_authenticated(&self) -> bool {
    self.token.is_some()
  }

  fn admin(&self, request: RequestBuilder) -> ClientResult<RequestBuilder> {
    let token = self.token.as_deref().ok_or(ClientError::Unauthorized)?;
    Ok(request.bearer_auth(token))
  }

  async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
      return response.json().await.map_err(Into::into);
    }

    let text = response.text().await?;
    let message = serde_json::from_str::<MessageBody>(&text)
      .map(|body| body.message)
      .unwrap_or(text);
    debug!(status = status.as_u16(), %message, "API call failed.");
    Err(match status {
      StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
      StatusCode::NOT_FOUND => ClientError::NotFound(message),
      StatusCode::BAD_REQUEST => ClientError::Validation(message),
      other => ClientError::Server {
        status: other.as_u16(),
        message,
      },
    })
  }

  fn get(&self, path: &str) -> RequestBuilder {
    self.client.get(self.config.api_url(path))
  }

  fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> RequestBuilder {
    self.client.post(self.config.api_url(path)).json(body)
  }

  fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> RequestBuilder {
    self.client.put(self.config.api_url(path)).json(body)
  }

  fn delete(&self, path: &str) -> RequestBuilder {
    self.client.delete(self.config.api_url(path))
  }

  // ========== Public catalog ==========

  pub async fn home_page_data(&self) -> ClientResult<HomePageData> {
    Self::send(self.get("page-data/home")).await
  }

  pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
    Self::send(self.get("products")).await
  }

  pub async fn get_settings(&self) -> ClientResult<Settings> {
    Self::send(self.get("settings")).await
  }

  // ========== Orders ==========

  #[instrument(skip_all, fields(items = request.cart_items.len(), total = request.total))]
  pub async fn create_order(&self, request: &OrderRequest) -> ClientResult<Order> {
    Self::send(self.post("orders", request)).await
  }

  /// Looks an order up by its short order id or its internal id.
  pub async fn get_order(&self, reference: &str) -> ClientResult<Order> {
    // Dot segments are dropped by the URL builder and would address the order list.
    if reference.is_empty() || reference.chars().all(|c| c == '.') {
      return Err(ClientError::NotFound("Order not found".to_string()));
    }
    let url = self.config.api_url_with_segment("orders", reference)?;
    Self::send(self.client.get(url)).await
  }

  pub async fn list_orders(&self) -> ClientResult<Vec<Order>> {
    Self::send(self.admin(self.get("orders"))?).await
  }

  pub async fn update_order_status(&self, id: Uuid, status: OrderStatus) -> ClientResult<Order> {
    let body = json!({ "status": status });
    Self::send(self.admin(self.put(&format!("orders/{}/status", id), &body))?).await
  }

  pub async fn delete_order(&self, id: Uuid) -> ClientResult<()> {
    let _: Value = Self::send(self.admin(self.delete(&format!("orders/{}", id)))?).await?;
    Ok(())
  }

  // ========== Admin session ==========

  /// Signs in and keeps the issued token for later admin calls.
  #[instrument(skip(self, password))]
  pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<()> {
    let body = json!({ "email": email, "password": password });
    let response: TokenResponse = Self::send(self.post("auth/login", &body)).await?;
    self.token = Some(response.token);
    Ok(())
  }

  /// Revokes the session server-side. The local token is dropped either way.
  pub async fn logout(&mut self) -> ClientResult<()> {
    let result = match self.token.as_deref() {
      Some(token) => {
        let request = self.client.post(self.config.api_url("auth/logout")).bearer_auth(token);
        Self::send::<Value>(request).await.map(|_| ())
      }
      None => Ok(()),
    };
    self.token = None;
    result
  }

  // ========== Products ==========

  pub async fn admin_products(&self, page: u32, search: &str) -> ClientResult<ProductPage> {
    let request = self
      .get("products/admin")
      .query(&[("page", page.to_string()), ("search", search.to_string())]);
    Self::send(self.admin(request)?).await
  }

  pub async fn create_product(&self, input: &ProductInput) -> ClientResult<Product> {
    Self::send(self.admin(self.post("products", input))?).await
  }

  pub async fn update_product(&self, id: Uuid, input: &ProductInput) -> ClientResult<Product> {
    Self::send(self.admin(self.put(&format!("products/{}", id), input))?).await
  }

  pub async fn delete_product(&self, id: Uuid) -> ClientResult<()> {
    let _: Value = Self::send(self.admin(self.delete(&format!("products/{}", id)))?).await?;
    Ok(())
  }

  // ========== Contact messages ==========

  pub async fn send_message(&self, input: &ContactMessageInput) -> ClientResult<ContactMessage> {
    Self::send(self.post("messages", input)).await
  }

  pub async fn list_messages(&self) -> ClientResult<Vec<ContactMessage>> {
    Self::send(self.admin(self.get("messages"))?).await
  }

  pub async fn set_message_read(&self, id: Uuid, is_read: bool) -> ClientResult<ContactMessage> {
    let body = json!({ "isRead": is_read });
    Self::send(self.admin(self.put(&format!("messages/{}/read", id), &body))?).await
  }

  pub async fn delete_message(&self, id: Uuid) -> ClientResult<()> {
    let _: Value = Self::send(self.admin(self.delete(&format!("messages/{}", id)))?).await?;
    Ok(())
  }

  // ========== Settings ==========

  /// Sends a partial settings document; returns the merged public settings.
  pub async fn update_settings(&self, patch: &Value) -> ClientResult<Settings> {
    Self::send(self.admin(self.put("settings", patch))?).await
  }
}
