// storefront/client/src/state.rs

//! The client's mirror of server state and the reducer that evolves it.
//!
//! `reduce` is pure: it never performs I/O and never reads the clock. Actions
//! that can raise a notification carry the instant they happened at.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use storefront_core::models::{ContactMessage, Order, PaymentMethod, Product, Settings};
use storefront_core::{AddOutcome, Cart, CheckoutError, CheckoutOptions, CheckoutSelection, PriceQuote, ProductPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
  Success,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
  pub id: u64,
  pub message: String,
  pub kind: NotificationKind,
  pub created_at: DateTime<Utc>,
}

impl Notification {
  pub fn ttl() -> Duration {
    Duration::seconds(3)
  }

  pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
    now - self.created_at >= Self::ttl()
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
  pub products: Vec<Product>,
  /// Set once the full catalog has been merged over the homepage subset.
  pub full_products_loaded: bool,
  pub settings: Option<Settings>,
  pub cart: Cart,
  pub cart_total: i64,
  pub selection: CheckoutSelection,
  pub last_order: Option<Order>,
  pub is_admin_authenticated: bool,
  pub orders: Vec<Order>,
  pub contact_messages: Vec<ContactMessage>,
  pub admin_products: Option<ProductPage>,
  pub loading: bool,
  pub notifications: Vec<Notification>,
  next_notification_id: u64,
}

impl ClientState {
  /// A fresh state around a rehydrated cart.
  pub fn with_cart(cart: Cart) -> Self {
    let cart_total = cart.total();
    Self {
      cart,
      cart_total,
      ..Self::default()
    }
  }

  pub fn checkout_options(&self) -> Option<CheckoutOptions> {
    self.settings.as_ref().map(CheckoutOptions::from_settings)
  }

  /// Prices the cart with the staged shipping and payment choice.
  pub fn quote(&self) -> Result<PriceQuote, CheckoutError> {
    let options = self.checkout_options().ok_or(CheckoutError::NoShippingOption)?;
    options.ensure_can_checkout(self.cart.items())?;
    self.selection.quote(self.cart.items(), &options)
  }

  pub fn find_product(&self, id: &str) -> Option<&Product> {
    self.products.iter().find(|p| p.id.to_string() == id)
  }

  pub fn active_notifications(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notification> {
    self.notifications.iter().filter(move |n| !n.is_expired_at(now))
  }

  fn set_cart(&mut self, cart: Cart) {
    self.cart_total = cart.total();
    self.cart = cart;
  }

  /// Expired entries are dropped on every push, so the list stays bounded by
  /// what was raised in the last TTL window.
  fn push_notification(&mut self, message: String, kind: NotificationKind, at: DateTime<Utc>) {
    self.notifications.retain(|n| !n.is_expired_at(at));
    self.next_notification_id += 1;
    self.notifications.push(Notification {
      id: self.next_notification_id,
      message,
      kind,
      created_at: at,
    });
  }

  fn reconcile_selection(&mut self) {
    if let Some(options) = self.checkout_options() {
      self.selection = std::mem::take(&mut self.selection).reconcile(&options);
    }
  }
}

#[derive(Debug, Clone)]
pub enum Action {
  LoadStarted,
  LoadFinished,
  HomeDataLoaded { settings: Settings, products: Vec<Product> },
  AdminDataLoaded { orders: Vec<Order>, messages: Vec<ContactMessage> },
  /// Merged by product id over whatever is already loaded.
  AllProductsLoaded(Vec<Product>),
  AdminProductsLoaded(ProductPage),

  AddToCart { product: Product, quantity: u32, size: String, at: DateTime<Utc> },
  /// A quantity of zero or less removes the line.
  SetQuantity { product_id: String, size: String, quantity: i64 },
  RemoveFromCart { product_id: String, size: String },
  ClearCart,
  SelectShipping { id: String, at: DateTime<Utc> },
  SelectPayment { method: PaymentMethod, at: DateTime<Utc> },
  /// The server accepted the order; the cart is emptied.
  OrderPlaced(Order),

  LoggedIn,
  LoggedOut,
  SettingsUpdated(Settings),
  ProductSaved(Product),
  ProductDeleted(Uuid),
  OrderUpdated(Order),
  OrderDeleted(Uuid),
  MessageUpdated(ContactMessage),
  MessageDeleted(Uuid),

  Notify { message: String, kind: NotificationKind, at: DateTime<Utc> },
  DismissNotification(u64),
  ExpireNotifications { now: DateTime<Utc> },
}

pub fn reduce(mut state: ClientState, action: Action) -> ClientState {
  match action {
    Action::LoadStarted => state.loading = true,
    Action::LoadFinished => state.loading = false,
    Action::HomeDataLoaded { settings, products } => {
      state.settings = Some(settings);
      state.products = products;
      state.full_products_loaded = false;
      state.reconcile_selection();
    }
    Action::AdminDataLoaded { orders, messages } => {
      state.orders = orders;
      state.contact_messages = messages;
    }
    Action::AllProductsLoaded(all) => {
      for product in all {
        match state.products.iter_mut().find(|p| p.id == product.id) {
          Some(existing) => *existing = product,
          None => state.products.push(product),
        }
      }
      state.full_products_loaded = true;
    }
    Action::AdminProductsLoaded(page) => state.admin_products = Some(page),

    Action::AddToCart { product, quantity, size, at } => match state.cart.added(&product, quantity, &size) {
      Ok((cart, outcome)) => {
        state.set_cart(cart);
        let message = match outcome {
          AddOutcome::Added => format!("{} (Size: {}) added to cart!", product.name, size),
          AddOutcome::Incremented { .. } => format!("Quantity updated for {} (Size: {})!", product.name, size),
        };
        state.push_notification(message, NotificationKind::Success, at);
      }
      Err(e) => state.push_notification(e.to_string(), NotificationKind::Error, at),
    },
    Action::SetQuantity { product_id, size, quantity } => {
      let cart = state.cart.with_quantity(&product_id, &size, quantity);
      state.set_cart(cart);
    }
    Action::RemoveFromCart { product_id, size } => {
      let cart = state.cart.without(&product_id, &size);
      state.set_cart(cart);
    }
    Action::ClearCart => {
      let cart = state.cart.cleared();
      state.set_cart(cart);
    }
    Action::SelectShipping { id, at } => {
      let Some(options) = state.checkout_options() else {
        state.push_notification("Shipping options are not loaded yet.".to_string(), NotificationKind::Error, at);
        return state;
      };
      match state.selection.clone().with_shipping_option(&id, &options) {
        Ok(selection) => state.selection = selection,
        Err(e) => state.push_notification(e.to_string(), NotificationKind::Error, at),
      }
    }
    Action::SelectPayment { method, at } => {
      let Some(options) = state.checkout_options() else {
        state.push_notification("Payment options are not loaded yet.".to_string(), NotificationKind::Error, at);
        return state;
      };
      match state.selection.clone().with_payment_method(method, &options) {
        Ok(selection) => state.selection = selection,
        Err(e) => state.push_notification(e.to_string(), NotificationKind::Error, at),
      }
    }
    Action::OrderPlaced(order) => {
      let cart = state.cart.cleared();
      state.set_cart(cart);
      if state.is_admin_authenticated {
        state.orders.insert(0, order.clone());
      }
      state.last_order = Some(order);
    }

    Action::LoggedIn => state.is_admin_authenticated = true,
    Action::LoggedOut => {
      state.is_admin_authenticated = false;
      state.orders.clear();
      state.contact_messages.clear();
      state.admin_products = None;
    }
    Action::SettingsUpdated(settings) => {
      state.settings = Some(settings);
      state.reconcile_selection();
    }
    Action::ProductSaved(product) => match state.products.iter_mut().find(|p| p.id == product.id) {
      Some(existing) => *existing = product,
      None => state.products.insert(0, product),
    },
    Action::ProductDeleted(id) => state.products.retain(|p| p.id != id),
    Action::OrderUpdated(order) => {
      if let Some(existing) = state.orders.iter_mut().find(|o| o.id == order.id) {
        *existing = order;
      }
    }
    Action::OrderDeleted(id) => state.orders.retain(|o| o.id != id),
    Action::MessageUpdated(message) => {
      if let Some(existing) = state.contact_messages.iter_mut().find(|m| m.id == message.id) {
        *existing = message;
      }
    }
    Action::MessageDeleted(id) => state.contact_messages.retain(|m| m.id != id),

    Action::Notify { message, kind, at } => state.push_notification(message, kind, at),
    Action::DismissNotification(id) => state.notifications.retain(|n| n.id != id),
    Action::ExpireNotifications { now } => state.notifications.retain(|n| !n.is_expired_at(now)),
  }
  state
}

#[cfg(test)]
mod tests {
  use super::*;
  use storefront_core::models::{ProductInput, ShippingOption};

  fn product(name: &str, price: i64) -> Product {
    ProductInput {
      name: name.to_string(),
      category: "Cotton".to_string(),
      price,
      sizes: vec!["M".to_string(), "L".to_string()],
      ..Default::default()
    }
    .into_product(Uuid::new_v4(), Utc::now())
  }

  fn settings() -> Settings {
    Settings {
      shipping_options: vec![
        ShippingOption {
          id: "inside".to_string(),
          label: "Inside Dhaka".to_string(),
          charge: 100,
        },
        ShippingOption {
          id: "outside".to_string(),
          label: "Outside Dhaka".to_string(),
          charge: 150,
        },
      ],
      ..Settings::default()
    }
  }

  fn add(state: ClientState, product: &Product, quantity: u32, size: &str) -> ClientState {
    reduce(
      state,
      Action::AddToCart {
        product: product.clone(),
        quantity,
        size: size.to_string(),
        at: Utc::now(),
      },
    )
  }

  #[test]
  fn cart_total_tracks_every_mutation() {
    let kurta = product("Kurta", 3500);
    let saree = product("Saree", 1200);

    let state = add(ClientState::default(), &kurta, 2, "M");
    assert_eq!(state.cart_total, 7000);
    let state = add(state, &kurta, 1, "M");
    assert_eq!(state.cart.len(), 1);
    assert_eq!(state.cart_total, 10500);
    let state = add(state, &saree, 1, "L");
    assert_eq!(state.cart_total, 11700);

    let state = reduce(
      state,
      Action::SetQuantity {
        product_id: kurta.id.to_string(),
        size: "M".to_string(),
        quantity: 0,
      },
    );
    assert_eq!(state.cart.len(), 1);
    assert_eq!(state.cart_total, 1200);

    let state = reduce(state, Action::ClearCart);
    assert!(state.cart.is_empty());
    assert_eq!(state.cart_total, 0);
  }

  #[test]
  fn add_without_size_notifies_and_leaves_cart() {
    let state = add(ClientState::default(), &product("Kurta", 3500), 1, "");
    assert!(state.cart.is_empty());
    assert_eq!(state.notifications.len(), 1);
    assert_eq!(state.notifications[0].kind, NotificationKind::Error);
    assert_eq!(state.notifications[0].message, "Please select a size.");
  }

  #[test]
  fn notifications_expire_after_three_seconds() {
    let at = Utc::now();
    let state = reduce(
      ClientState::default(),
      Action::Notify {
        message: "Saved".to_string(),
        kind: NotificationKind::Success,
        at,
      },
    );
    assert_eq!(state.active_notifications(at + Duration::milliseconds(2999)).count(), 1);
    assert_eq!(state.active_notifications(at + Duration::seconds(3)).count(), 0);

    let state = reduce(state, Action::ExpireNotifications { now: at + Duration::seconds(3) });
    assert!(state.notifications.is_empty());
  }

  #[test]
  fn raising_a_notification_drops_expired_ones() {
    let start = Utc::now();
    let mut state = ClientState::default();
    for second in 0..100 {
      state = reduce(
        state,
        Action::Notify {
          message: format!("Saved {}", second),
          kind: NotificationKind::Success,
          at: start + Duration::seconds(second),
        },
      );
    }
    let kept: Vec<&str> = state.notifications.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(kept, ["Saved 97", "Saved 98", "Saved 99"]);
    assert_eq!(state.notifications.last().map(|n| n.id), Some(100));
  }

  #[test]
  fn home_data_selects_defaults_and_quote_waives_shipping_online() {
    let kurta = product("Kurta", 3500);
    let state = reduce(
      ClientState::default(),
      Action::HomeDataLoaded {
        settings: settings(),
        products: vec![kurta.clone()],
      },
    );
    assert_eq!(state.selection.shipping_option_id.as_deref(), Some("inside"));
    assert_eq!(state.selection.payment_method, Some(PaymentMethod::Cod));

    let state = add(state, &kurta, 2, "M");
    assert_eq!(state.quote().unwrap().total_payable, 7100);

    let state = reduce(
      state,
      Action::SelectPayment {
        method: PaymentMethod::Online,
        at: Utc::now(),
      },
    );
    assert_eq!(state.quote().unwrap().total_payable, 7000);
  }

  #[test]
  fn unknown_shipping_choice_keeps_previous_selection() {
    let state = reduce(
      ClientState::default(),
      Action::HomeDataLoaded {
        settings: settings(),
        products: Vec::new(),
      },
    );
    let state = reduce(
      state,
      Action::SelectShipping {
        id: "mars".to_string(),
        at: Utc::now(),
      },
    );
    assert_eq!(state.selection.shipping_option_id.as_deref(), Some("inside"));
    assert_eq!(state.notifications.len(), 1);
  }

  #[test]
  fn full_catalog_merges_by_id() {
    let kurta = product("Kurta", 3500);
    let mut renamed = kurta.clone();
    renamed.name = "Kurta (restocked)".to_string();
    let saree = product("Saree", 1200);

    let state = reduce(
      ClientState::default(),
      Action::HomeDataLoaded {
        settings: settings(),
        products: vec![kurta],
      },
    );
    let state = reduce(state, Action::AllProductsLoaded(vec![renamed, saree]));
    assert!(state.full_products_loaded);
    assert_eq!(state.products.len(), 2);
    assert_eq!(state.products[0].name, "Kurta (restocked)");
  }

  #[test]
  fn logout_purges_admin_collections() {
    let mut state = reduce(ClientState::default(), Action::LoggedIn);
    state.admin_products = Some(ProductPage::new(Vec::new(), 1, 10, 0));
    let state = reduce(state, Action::LoggedOut);
    assert!(!state.is_admin_authenticated);
    assert!(state.orders.is_empty());
    assert!(state.admin_products.is_none());
  }
}
