// storefront/client/src/persist.rs

//! Durable cart storage: one JSON file holding only `{ "cart": [...] }`.
//!
//! Loading never fails on bad content. Entries that do not describe a valid
//! cart line are dropped and an unreadable file yields an empty cart.

use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::ClientResult;
use storefront_core::models::CartItem;
use storefront_core::Cart;

#[derive(Serialize)]
struct PersistedState<'a> {
  cart: &'a Cart,
}

#[derive(Debug, Clone)]
pub struct CartFile {
  path: PathBuf,
}

impl CartFile {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Reads the persisted cart. A missing file is an empty cart; I/O errors
  /// other than that are reported.
  pub fn load(&self) -> ClientResult<Cart> {
    let raw = match fs::read_to_string(&self.path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Cart::new()),
      Err(e) => return Err(e.into()),
    };
    Ok(parse_cart(&raw))
  }

  /// Writes the cart through a sibling temp file so a crash mid-write never
  /// leaves a truncated document behind.
  pub fn save(&self, cart: &Cart) -> ClientResult<()> {
    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_vec_pretty(&PersistedState { cart })?;
    let tmp = self.path.with_extension("json.tmp");
    fs::write(&tmp, body)?;
    fs::rename(&tmp, &self.path)?;
    debug!(path = %self.path.display(), lines = cart.len(), "Cart persisted.");
    Ok(())
  }
}

/// Rehydrates a cart from persisted JSON, keeping only well-formed lines.
pub fn parse_cart(raw: &str) -> Cart {
  let document: Value = match serde_json::from_str(raw) {
    Ok(value) => value,
    Err(e) => {
      warn!(error = %e, "Persisted cart is not valid JSON; starting empty.");
      return Cart::new();
    }
  };
  let Some(entries) = document.get("cart").and_then(Value::as_array) else {
    warn!("Persisted state has no cart array; starting empty.");
    return Cart::new();
  };

  let total = entries.len();
  let lines: Vec<CartItem> = entries.iter().filter_map(valid_line).collect();
  if lines.len() != total {
    warn!(dropped = total - lines.len(), "Dropped malformed persisted cart lines.");
  }
  Cart::from_items(lines)
}

fn valid_line(entry: &Value) -> Option<CartItem> {
  let object = entry.as_object()?;
  // Numbers only: a price of "3500" is rejected rather than coerced.
  if !object.get("price").is_some_and(Value::is_i64) || !object.get("quantity").is_some_and(Value::is_u64) {
    return None;
  }
  let item: CartItem = serde_json::from_value(entry.clone()).ok()?;
  let well_formed = !item.product_id.trim().is_empty()
    && !item.size.trim().is_empty()
    && item.price >= 0
    && item.quantity > 0
    && item.line_total().is_some();
  well_formed.then_some(item)
}
