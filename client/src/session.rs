// storefront/client/src/session.rs

use chrono::Utc;
use serde_json::Value;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::persist::CartFile;
use crate::state::{reduce, Action, ClientState, NotificationKind};
use storefront_core::models::{
  ContactMessageInput, CustomerDetails, Order, OrderRequest, OrderStatus, PaymentDetails, PaymentInfo, PaymentMethod,
  Product, ProductInput,
};

/// Drives a storefront session: owns the state mirror and the API client,
/// turns every round trip into reducer actions, and persists the cart after
/// each cart-changing action.
///
/// Failed calls become error notifications and leave prior state untouched.
pub struct Storefront {
  api: ApiClient,
  state: ClientState,
  cart_file: Option<CartFile>,
}

impl Storefront {
  /// Builds the session and rehydrates the persisted cart, if configured.
  pub fn new(config: ClientConfig) -> ClientResult<Self> {
    let cart_file = config.cart_path.clone().map(CartFile::new);
    let cart = match &cart_file {
      Some(file) => file.load().unwrap_or_else(|e| {
        warn!(error = %e, "Could not read the persisted cart; starting empty.");
        Default::default()
      }),
      None => Default::default(),
    };
    Ok(Self {
      api: ApiClient::new(config)?,
      state: ClientState::with_cart(cart),
      cart_file,
    })
  }

  pub fn state(&self) -> &ClientState {
    &self.state
  }

  pub fn api(&self) -> &ApiClient {
    &self.api
  }

  pub fn dispatch(&mut self, action: Action) {
    let cart_changing = matches!(
      action,
      Action::AddToCart { .. }
        | Action::SetQuantity { .. }
        | Action::RemoveFromCart { .. }
        | Action::ClearCart
        | Action::OrderPlaced(_)
    );
    self.state = reduce(std::mem::take(&mut self.state), action);
    if cart_changing {
      self.persist_cart();
    }
  }

  fn persist_cart(&self) {
    if let Some(file) = &self.cart_file {
      if let Err(e) = file.save(&self.state.cart) {
        error!(error = %e, path = %file.path().display(), "Failed to persist the cart.");
      }
    }
  }

  fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
    self.dispatch(Action::Notify {
      message: message.into(),
      kind,
      at: Utc::now(),
    });
  }

  fn fail(&mut self, context: &str, err: &ClientError) {
    warn!(error = %err, "{}", context);
    self.notify(context.to_string(), NotificationKind::Error);
  }

  pub fn expire_notifications(&mut self) {
    self.dispatch(Action::ExpireNotifications { now: Utc::now() });
  }

  // ========== Loading ==========

  /// Homepage bundle first; admin orders and messages when signed in.
  #[instrument(skip(self))]
  pub async fn load_initial_data(&mut self) {
    self.dispatch(Action::LoadStarted);
    if let Err(e) = self.fetch_initial_data().await {
      self.fail("Could not connect to the server.", &e);
    }
    self.dispatch(Action::LoadFinished);
  }

  async fn fetch_initial_data(&mut self) -> ClientResult<()> {
    let home = self.api.home_page_data().await?;
    self.dispatch(Action::HomeDataLoaded {
      settings: home.settings,
      products: home.products,
    });
    if self.state.is_admin_authenticated {
      let orders = self.api.list_orders().await?;
      let messages = self.api.list_messages().await?;
      self.dispatch(Action::AdminDataLoaded { orders, messages });
    }
    Ok(())
  }

  pub async fn ensure_all_products_loaded(&mut self) {
    if self.state.full_products_loaded {
      return;
    }
    match self.api.list_products().await {
      Ok(products) => self.dispatch(Action::AllProductsLoaded(products)),
      Err(e) => self.fail("Could not load all products.", &e),
    }
  }

  pub async fn load_admin_products(&mut self, page: u32, search: &str) {
    if !self.api.is_authenticated() {
      return;
    }
    match self.api.admin_products(page, search).await {
      Ok(page) => self.dispatch(Action::AdminProductsLoaded(page)),
      Err(e) => self.fail("Could not load products for admin panel.", &e),
    }
  }

  // ========== Cart ==========

  pub fn add_to_cart(&mut self, product: &Product, quantity: u32, size: &str) {
    self.dispatch(Action::AddToCart {
      product: product.clone(),
      quantity,
      size: size.to_string(),
      at: Utc::now(),
    });
  }

  pub fn set_quantity(&mut self, product_id: &str, size: &str, quantity: i64) {
    self.dispatch(Action::SetQuantity {
      product_id: product_id.to_string(),
      size: size.to_string(),
      quantity,
    });
  }

  pub fn remove_from_cart(&mut self, product_id: &str, size: &str) {
    self.dispatch(Action::RemoveFromCart {
      product_id: product_id.to_string(),
      size: size.to_string(),
    });
  }

  pub fn clear_cart(&mut self) {
    self.dispatch(Action::ClearCart);
  }

  pub fn select_shipping(&mut self, id: &str) {
    self.dispatch(Action::SelectShipping {
      id: id.to_string(),
      at: Utc::now(),
    });
  }

  pub fn select_payment(&mut self, method: PaymentMethod) {
    self.dispatch(Action::SelectPayment { method, at: Utc::now() });
  }

  // ========== Checkout ==========

  fn order_request(&self, customer: CustomerDetails, payment_details: Option<PaymentDetails>) -> ClientResult<OrderRequest> {
    let quote = self.state.quote()?;
    let payment_method = self.state.selection.payment_method.ok_or(storefront_core::CheckoutError::NoPaymentMethod)?;
    let payment_details = match payment_method {
      PaymentMethod::Online => payment_details.map(|details| PaymentDetails {
        amount: quote.total_payable,
        ..details
      }),
      PaymentMethod::Cod => None,
    };
    Ok(OrderRequest {
      customer_details: customer,
      cart_items: self.state.cart.items().to_vec(),
      total: quote.total_payable,
      payment_info: PaymentInfo {
        payment_method,
        payment_details,
      },
      shipping_option_id: self.state.selection.shipping_option_id.clone(),
    })
  }

  /// Submits the cart as an order. The cart is cleared only when the server
  /// accepted it.
  #[instrument(skip_all, fields(lines = self.state.cart.len()))]
  pub async fn place_order(
    &mut self,
    customer: CustomerDetails,
    payment_details: Option<PaymentDetails>,
  ) -> Option<Order> {
    let request = match self.order_request(customer, payment_details) {
      Ok(request) => request,
      Err(e) => {
        let message = e.user_message();
        warn!(error = %e, "Checkout blocked before submission.");
        self.notify(message, NotificationKind::Error);
        return None;
      }
    };

    match self.api.create_order(&request).await {
      Ok(order) => {
        info!(order_id = %order.order_id, "Order placed.");
        self.dispatch(Action::OrderPlaced(order.clone()));
        self.notify(format!("Order {} placed successfully!", order.order_id), NotificationKind::Success);
        Some(order)
      }
      Err(e) => {
        let message = format!("Could not place order: {}", e.user_message());
        warn!(error = %e, "Order submission failed.");
        self.notify(message, NotificationKind::Error);
        None
      }
    }
  }

  pub async fn track_order(&mut self, reference: &str) -> Option<Order> {
    match self.api.get_order(reference.trim()).await {
      Ok(order) => Some(order),
      Err(e) => {
        self.fail("Order not found.", &e);
        None
      }
    }
  }

  // ========== Admin session ==========

  pub async fn login(&mut self, email: &str, password: &str) -> bool {
    match self.api.login(email, password).await {
      Ok(()) => {
        self.dispatch(Action::LoggedIn);
        self.notify("Login successful!", NotificationKind::Success);
        if let Err(e) = self.fetch_initial_data().await {
          self.fail("Failed to fetch admin data.", &e);
        }
        true
      }
      Err(e) => {
        self.fail("Incorrect email or password.", &e);
        false
      }
    }
  }

  pub async fn logout(&mut self) {
    if let Err(e) = self.api.logout().await {
      warn!(error = %e, "Server-side logout failed; dropping the local session anyway.");
    }
    self.dispatch(Action::LoggedOut);
    self.notify("You have been logged out.", NotificationKind::Success);
  }

  // ========== Admin mutations ==========

  pub async fn add_product(&mut self, input: &ProductInput) -> Option<Product> {
    match self.api.create_product(input).await {
      Ok(product) => {
        self.dispatch(Action::ProductSaved(product.clone()));
        self.notify("Product added successfully!", NotificationKind::Success);
        Some(product)
      }
      Err(e) => {
        self.fail("Could not add product.", &e);
        None
      }
    }
  }

  pub async fn update_product(&mut self, id: Uuid, input: &ProductInput) -> Option<Product> {
    match self.api.update_product(id, input).await {
      Ok(product) => {
        self.dispatch(Action::ProductSaved(product.clone()));
        self.notify("Product updated successfully!", NotificationKind::Success);
        Some(product)
      }
      Err(e) => {
        self.fail("Could not update product.", &e);
        None
      }
    }
  }

  pub async fn delete_product(&mut self, id: Uuid) {
    match self.api.delete_product(id).await {
      Ok(()) => {
        self.dispatch(Action::ProductDeleted(id));
        self.notify("Product deleted successfully.", NotificationKind::Success);
      }
      Err(e) => self.fail("Could not delete product.", &e),
    }
  }

  pub async fn update_order_status(&mut self, id: Uuid, status: OrderStatus) {
    match self.api.update_order_status(id, status).await {
      Ok(order) => {
        let message = format!("Order {} status updated to {}.", order.order_id, order.status);
        self.dispatch(Action::OrderUpdated(order));
        self.notify(message, NotificationKind::Success);
      }
      Err(e) => self.fail("Could not update order status.", &e),
    }
  }

  pub async fn delete_order(&mut self, id: Uuid) {
    let order_id = self
      .state
      .orders
      .iter()
      .find(|o| o.id == id)
      .map(|o| o.order_id.clone())
      .unwrap_or_else(|| id.to_string());
    match self.api.delete_order(id).await {
      Ok(()) => {
        self.dispatch(Action::OrderDeleted(id));
        self.notify(format!("Order {} has been deleted.", order_id), NotificationKind::Success);
      }
      Err(e) => self.fail("Could not delete order.", &e),
    }
  }

  pub async fn send_contact_message(&mut self, input: &ContactMessageInput) -> bool {
    match self.api.send_message(input).await {
      Ok(_) => {
        self.notify("Message sent. We will get back to you soon!", NotificationKind::Success);
        true
      }
      Err(e) => {
        self.fail("Could not send your message.", &e);
        false
      }
    }
  }

  pub async fn set_message_read(&mut self, id: Uuid, is_read: bool) {
    match self.api.set_message_read(id, is_read).await {
      Ok(message) => {
        self.dispatch(Action::MessageUpdated(message));
        let label = if is_read { "read" } else { "unread" };
        self.notify(format!("Message marked as {}.", label), NotificationKind::Success);
      }
      Err(e) => self.fail("Could not update message.", &e),
    }
  }

  pub async fn delete_message(&mut self, id: Uuid) {
    match self.api.delete_message(id).await {
      Ok(()) => {
        self.dispatch(Action::MessageDeleted(id));
        self.notify("Message has been deleted.", NotificationKind::Success);
      }
      Err(e) => self.fail("Could not delete message.", &e),
    }
  }

  /// Unlike the other mutations the error is also returned, so a settings
  /// form can stay open.
  pub async fn update_settings(&mut self, patch: &Value) -> ClientResult<()> {
    match self.api.update_settings(patch).await {
      Ok(settings) => {
        self.dispatch(Action::SettingsUpdated(settings));
        self.notify("Settings updated successfully!", NotificationKind::Success);
        Ok(())
      }
      Err(e) => {
        self.notify(format!("Error: {}", e.user_message()), NotificationKind::Error);
        Err(e)
      }
    }
  }
}
