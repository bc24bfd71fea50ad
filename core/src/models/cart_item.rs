// storefront/core/src/models/cart_item.rs

use serde::{Deserialize, Serialize};

use crate::models::product::Product;

/// A cart or order line. Name, price and image are copied from the product
/// when the line is created; later product edits never reach existing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
  /// Weak reference to the product. Serialized as `id` on the wire.
  #[serde(rename = "id", alias = "productId")]
  pub product_id: String,
  pub name: String,
  pub price: i64,
  pub quantity: u32,
  #[serde(default)]
  pub image: String,
  pub size: String,
}

impl CartItem {
  pub fn from_product(product: &Product, quantity: u32, size: &str) -> Self {
    Self {
      product_id: product.id.to_string(),
      name: product.name.clone(),
      price: product.price,
      quantity,
      image: product.primary_image().unwrap_or_default().to_string(),
      size: size.to_string(),
    }
  }

  /// `None` when price times quantity does not fit an `i64`.
  pub fn line_total(&self) -> Option<i64> {
    self.price.checked_mul(i64::from(self.quantity))
  }

  /// Lines are keyed by (product, size).
  pub fn is_line(&self, product_id: &str, size: &str) -> bool {
    self.product_id == product_id && self.size == size
  }
}
