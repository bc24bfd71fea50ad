// storefront/core/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

use crate::error::ValidationError;

/// Products without an explicit position sort after every positioned one.
pub const DEFAULT_DISPLAY_ORDER: i32 = 1000;

/// Size sentinel meaning one size fits all.
pub const FREE_SIZE: &str = "Free";

fn default_display_order() -> i32 {
  DEFAULT_DISPLAY_ORDER
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub category: String,
  pub price: i64,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub fabric: String,
  #[serde(default)]
  pub colors: Vec<String>,
  #[serde(default)]
  pub sizes: Vec<String>,
  #[serde(default)]
  pub is_new_arrival: bool,
  #[serde(default)]
  pub is_trending: bool,
  #[serde(default)]
  pub on_sale: bool,
  #[serde(default)]
  pub images: Vec<String>,
  #[serde(default = "default_display_order")]
  pub display_order: i32,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Product {
  pub fn primary_image(&self) -> Option<&str> {
    self.images.first().map(String::as_str)
  }

  /// Shown on the homepage bundle.
  pub fn is_featured(&self) -> bool {
    self.is_new_arrival || self.is_trending
  }

  pub fn offers_size(&self, size: &str) -> bool {
    self.sizes.iter().any(|s| s == size)
  }

  pub fn name_matches(&self, needle: &str) -> bool {
    self.name.to_lowercase().contains(&needle.to_lowercase())
  }
}

/// Catalog order: newest first.
pub fn by_recency(a: &Product, b: &Product) -> Ordering {
  b.created_at.cmp(&a.created_at)
}

/// Homepage order: `displayOrder` ascending, then newest first.
pub fn by_display_order(a: &Product, b: &Product) -> Ordering {
  a.display_order
    .cmp(&b.display_order)
    .then_with(|| by_recency(a, b))
}

/// Admin-submitted product fields. Any `id` in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
  pub name: String,
  pub category: String,
  pub price: i64,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub fabric: String,
  #[serde(default)]
  pub colors: Vec<String>,
  #[serde(default)]
  pub sizes: Vec<String>,
  #[serde(default)]
  pub is_new_arrival: bool,
  #[serde(default)]
  pub is_trending: bool,
  #[serde(default)]
  pub on_sale: bool,
  #[serde(default)]
  pub images: Vec<String>,
  #[serde(default)]
  pub display_order: Option<i32>,
}

impl ProductInput {
  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.name.trim().is_empty() {
      return Err(ValidationError::InvalidField { field: "name", reason: "is required" });
    }
    if self.category.trim().is_empty() {
      return Err(ValidationError::InvalidField { field: "category", reason: "is required" });
    }
    if self.price < 0 {
      return Err(ValidationError::InvalidField { field: "price", reason: "must not be negative" });
    }
    if self.sizes.iter().any(|s| s.trim().is_empty()) {
      return Err(ValidationError::InvalidField { field: "sizes", reason: "must not contain blank sizes" });
    }
    Ok(())
  }

  pub fn into_product(self, id: Uuid, now: DateTime<Utc>) -> Product {
    Product {
      id,
      name: self.name.trim().to_string(),
      category: self.category.trim().to_string(),
      price: self.price,
      description: self.description,
      fabric: self.fabric,
      colors: self.colors,
      sizes: self.sizes,
      is_new_arrival: self.is_new_arrival,
      is_trending: self.is_trending,
      on_sale: self.on_sale,
      images: self.images,
      display_order: self.display_order.unwrap_or(DEFAULT_DISPLAY_ORDER),
      created_at: now,
      updated_at: now,
    }
  }

  /// Replaces every editable field of `existing`, keeping its id and creation time.
  pub fn apply_to(self, existing: &Product, now: DateTime<Utc>) -> Product {
    let display_order = self.display_order.unwrap_or(existing.display_order);
    let mut updated = self.into_product(existing.id, existing.created_at);
    updated.display_order = display_order;
    updated.updated_at = now;
    updated
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  fn input(name: &str, display_order: Option<i32>) -> ProductInput {
    ProductInput {
      name: name.to_string(),
      category: "Cotton".to_string(),
      price: 100,
      sizes: vec!["M".to_string()],
      is_new_arrival: true,
      display_order,
      ..Default::default()
    }
  }

  #[test]
  fn display_order_sorts_before_recency() {
    let now = Utc::now();
    let mut products = vec![
      input("old-first", Some(1)).into_product(Uuid::new_v4(), now - Duration::minutes(60)),
      input("new-default", None).into_product(Uuid::new_v4(), now - Duration::minutes(1)),
      input("new-first", Some(1)).into_product(Uuid::new_v4(), now - Duration::minutes(5)),
    ];
    products.sort_by(by_display_order);
    let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["new-first", "old-first", "new-default"]);
  }

  #[test]
  fn apply_to_keeps_identity_and_creation_time() {
    let existing = input("Gulmohar", Some(3)).into_product(Uuid::new_v4(), Utc::now() - Duration::days(2));
    let mut edit = input("Gulmohar Lawn", None);
    edit.price = 3600;
    let updated = edit.apply_to(&existing, Utc::now());
    assert_eq!(updated.id, existing.id);
    assert_eq!(updated.created_at, existing.created_at);
    assert_eq!(updated.display_order, 3);
    assert_eq!(updated.price, 3600);
    assert!(updated.updated_at > existing.updated_at);
  }

  #[test]
  fn blank_name_is_rejected() {
    assert!(matches!(
      input("  ", None).validate(),
      Err(ValidationError::InvalidField { field: "name", .. })
    ));
  }
}
