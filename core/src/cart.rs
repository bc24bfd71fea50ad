// storefront/core/src/cart.rs

//! The shopping cart value.
//!
//! A `Cart` is immutable from the outside: every mutation returns a new cart.
//! Lines are unique by `(product_id, size)` and always hold a quantity of at
//! least one.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CartError;
use crate::models::{CartItem, Product};
use crate::pricing;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
  items: Vec<CartItem>,
}

/// What `Cart::added` did with the requested line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
  Added,
  /// An existing line for the same product and size was bumped.
  Incremented { quantity: u32 },
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a cart from arbitrary lines, folding duplicates into the first
  /// occurrence and dropping zero-quantity lines.
  pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
    let mut merged: Vec<CartItem> = Vec::new();
    for item in items {
      if item.quantity == 0 {
        continue;
      }
      match merged.iter_mut().find(|line| line.is_line(&item.product_id, &item.size)) {
        Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
        None => merged.push(item),
      }
    }
    Self { items: merged }
  }

  pub fn items(&self) -> &[CartItem] {
    &self.items
  }

  pub fn into_items(self) -> Vec<CartItem> {
    self.items
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  /// Total number of units across all lines.
  pub fn unit_count(&self) -> u32 {
    self.items.iter().map(|i| i.quantity).sum()
  }

  pub fn total(&self) -> i64 {
    pricing::subtotal(&self.items)
  }

  pub fn added(&self, product: &Product, quantity: u32, size: &str) -> Result<(Cart, AddOutcome), CartError> {
    if size.trim().is_empty() {
      return Err(CartError::MissingSize);
    }
    if !product.sizes.is_empty() && !product.offers_size(size) {
      return Err(CartError::UnknownSize {
        product_name: product.name.clone(),
        size: size.to_string(),
      });
    }
    if quantity == 0 {
      return Err(CartError::InvalidQuantity);
    }

    let product_id = product.id.to_string();
    let mut items = self.items.clone();
    let outcome = match items.iter_mut().find(|line| line.is_line(&product_id, size)) {
      Some(line) => {
        line.quantity = line.quantity.saturating_add(quantity);
        AddOutcome::Incremented { quantity: line.quantity }
      }
      None => {
        items.push(CartItem::from_product(product, quantity, size));
        AddOutcome::Added
      }
    };
    Ok((Cart { items }, outcome))
  }

  /// Sets the quantity of one line. Zero or less removes it; an unknown line
  /// leaves the cart as it is.
  pub fn with_quantity(&self, product_id: &str, size: &str, quantity: i64) -> Cart {
    let items = if quantity <= 0 {
      self
        .items
        .iter()
        .filter(|line| !line.is_line(product_id, size))
        .cloned()
        .collect()
    } else {
      let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
      self
        .items
        .iter()
        .map(|line| {
          if line.is_line(product_id, size) {
            CartItem {
              quantity,
              ..line.clone()
            }
          } else {
            line.clone()
          }
        })
        .collect()
    };
    Cart { items }
  }

  pub fn without(&self, product_id: &str, size: &str) -> Cart {
    self.with_quantity(product_id, size, 0)
  }

  pub fn cleared(&self) -> Cart {
    Cart::new()
  }
}

impl<'de> Deserialize<'de> for Cart {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let items = Vec::<CartItem>::deserialize(deserializer)?;
    Ok(Cart::from_items(items))
  }
}

impl From<Vec<CartItem>> for Cart {
  fn from(items: Vec<CartItem>) -> Self {
    Cart::from_items(items)
  }
}
