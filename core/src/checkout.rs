// storefront/core/src/checkout.rs

use tracing::debug;

use crate::cart::Cart;
use crate::error::CheckoutError;
use crate::models::{OrderDraft, OrderRequest, PaymentMethod};
use crate::pricing::{self, CheckoutOptions};

/// Validates a public order request against the current checkout options and
/// turns it into an [`OrderDraft`].
///
/// The submitted total is checked against the server's own pricing: with a
/// named shipping option it must equal the payable amount exactly, without
/// one it may not undercut the cart subtotal. Payment details are only kept
/// for online payments.
pub fn validate_order_request(request: OrderRequest, options: &CheckoutOptions) -> Result<OrderDraft, CheckoutError> {
  let OrderRequest {
    customer_details,
    cart_items,
    total,
    payment_info,
    shipping_option_id,
  } = request;

  if cart_items.is_empty() {
    return Err(CheckoutError::EmptyCart);
  }
  for (index, item) in cart_items.iter().enumerate() {
    if item.product_id.trim().is_empty() {
      return Err(CheckoutError::InvalidCartItem { index, reason: "missing product id" });
    }
    if item.quantity == 0 {
      return Err(CheckoutError::InvalidCartItem { index, reason: "quantity must be at least 1" });
    }
    if item.price < 0 {
      return Err(CheckoutError::InvalidCartItem { index, reason: "price must not be negative" });
    }
  }

  let name = required(customer_details.name, "name")?;
  let phone = required(customer_details.phone, "phone")?;
  let address = required(customer_details.address, "address")?;
  let city = if options.city_required {
    required(customer_details.city, "city")?
  } else {
    customer_details.city.trim().to_string()
  };

  let payment_method = payment_info.payment_method;
  if !options.is_method_available(payment_method) {
    return Err(CheckoutError::PaymentMethodUnavailable { method: payment_method });
  }
  let payment_details = match payment_method {
    PaymentMethod::Cod => None,
    PaymentMethod::Online => {
      let details = payment_info.payment_details.ok_or(CheckoutError::MissingPaymentDetails)?;
      if details.payment_number.trim().is_empty() || details.transaction_id.trim().is_empty() || details.method.trim().is_empty()
      {
        return Err(CheckoutError::MissingPaymentDetails);
      }
      Some(details)
    }
  };

  let cart = Cart::from_items(cart_items);
  let subtotal = checked_cart_subtotal(&cart)?;
  match shipping_option_id.as_deref() {
    Some(id) => {
      let shipping = options
        .find_shipping(id)
        .ok_or_else(|| CheckoutError::UnknownShippingOption { id: id.to_string() })?;
      let expected = subtotal
        .checked_add(pricing::effective_shipping_charge(shipping.charge, payment_method))
        .ok_or(CheckoutError::InvalidCartItem {
          index: cart.len() - 1,
          reason: "order total is out of range",
        })?;
      if expected != total {
        return Err(CheckoutError::TotalMismatch {
          expected,
          submitted: total,
        });
      }
    }
    None => {
      if total < subtotal {
        return Err(CheckoutError::TotalBelowSubtotal { subtotal, submitted: total });
      }
    }
  }

  debug!(lines = cart.len(), subtotal, total, method = %payment_method, "Order request validated");

  Ok(OrderDraft {
    customer_name: name,
    phone,
    address,
    city,
    cart_items: cart.into_items(),
    total,
    payment_method,
    payment_details,
  })
}

/// Sums the folded cart, naming the first line whose total or running
/// subtotal no longer fits an `i64`.
fn checked_cart_subtotal(cart: &Cart) -> Result<i64, CheckoutError> {
  let mut subtotal: i64 = 0;
  for (index, item) in cart.items().iter().enumerate() {
    let line = item.line_total().ok_or(CheckoutError::InvalidCartItem {
      index,
      reason: "line total is out of range",
    })?;
    subtotal = subtotal.checked_add(line).ok_or(CheckoutError::InvalidCartItem {
      index,
      reason: "cart total is out of range",
    })?;
  }
  Ok(subtotal)
}

fn required(value: String, field: &'static str) -> Result<String, CheckoutError> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    Err(CheckoutError::MissingField { field })
  } else {
    Ok(trimmed.to_string())
  }
}
