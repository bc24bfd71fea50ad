// storefront/core/src/pricing.rs

//! The cart pricing engine.
//!
//! Everything here is a pure function of the cart, the shipping selection and
//! the payment method. Orders paid online are never charged shipping when
//! totalled; this is store policy.

use serde::{Deserialize, Serialize};

use crate::error::CheckoutError;
use crate::models::{CartItem, PaymentMethod, Settings, ShippingOption};

/// Sum of line totals, saturating at `i64::MAX`. Use [`checked_subtotal`]
/// where an out-of-range cart must be rejected.
pub fn subtotal(items: &[CartItem]) -> i64 {
  checked_subtotal(items).unwrap_or(i64::MAX)
}

pub fn checked_subtotal(items: &[CartItem]) -> Option<i64> {
  items
    .iter()
    .try_fold(0i64, |sum, item| item.line_total().and_then(|line| sum.checked_add(line)))
}

pub fn effective_shipping_charge(shipping_charge: i64, payment_method: PaymentMethod) -> i64 {
  match payment_method {
    PaymentMethod::Online => 0,
    PaymentMethod::Cod => shipping_charge,
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
  pub subtotal: i64,
  pub shipping_charge: i64,
  pub effective_shipping_charge: i64,
  pub total_payable: i64,
}

pub fn quote(items: &[CartItem], shipping: Option<&ShippingOption>, payment_method: PaymentMethod) -> PriceQuote {
  let subtotal = subtotal(items);
  let shipping_charge = shipping.map_or(0, |option| option.charge);
  let effective_shipping_charge = effective_shipping_charge(shipping_charge, payment_method);
  PriceQuote {
    subtotal,
    shipping_charge,
    effective_shipping_charge,
    total_payable: subtotal.saturating_add(effective_shipping_charge),
  }
}

/// What the store currently lets a customer choose at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOptions {
  pub cod_enabled: bool,
  pub online_payment_enabled: bool,
  pub online_payment_methods: Vec<String>,
  pub shipping_options: Vec<ShippingOption>,
  pub city_required: bool,
}

impl CheckoutOptions {
  pub fn from_settings(settings: &Settings) -> Self {
    Self {
      cod_enabled: settings.cod_enabled,
      online_payment_enabled: settings.online_payment_enabled,
      online_payment_methods: settings.online_payment_methods.clone(),
      shipping_options: settings.shipping_options.clone(),
      city_required: settings.show_city_field,
    }
  }

  pub fn is_method_available(&self, method: PaymentMethod) -> bool {
    match method {
      PaymentMethod::Cod => self.cod_enabled,
      PaymentMethod::Online => self.online_payment_enabled,
    }
  }

  pub fn available_methods(&self) -> Vec<PaymentMethod> {
    [PaymentMethod::Cod, PaymentMethod::Online]
      .into_iter()
      .filter(|m| self.is_method_available(*m))
      .collect()
  }

  /// Cash on delivery when enabled, otherwise online, otherwise nothing.
  pub fn default_payment_method(&self) -> Option<PaymentMethod> {
    self.available_methods().into_iter().next()
  }

  pub fn find_shipping(&self, id: &str) -> Option<&ShippingOption> {
    self.shipping_options.iter().find(|o| o.id == id)
  }

  /// The selected option, falling back to the first configured one.
  pub fn resolve_shipping(&self, selected_id: Option<&str>) -> Option<&ShippingOption> {
    selected_id
      .and_then(|id| self.find_shipping(id))
      .or_else(|| self.shipping_options.first())
  }

  /// Checkout is blocked for an empty cart, with no shipping option, or with
  /// no payment method enabled.
  pub fn ensure_can_checkout(&self, items: &[CartItem]) -> Result<(), CheckoutError> {
    if items.is_empty() || subtotal(items) == 0 {
      return Err(CheckoutError::EmptyCart);
    }
    if self.shipping_options.is_empty() {
      return Err(CheckoutError::NoShippingOption);
    }
    if self.default_payment_method().is_none() {
      return Err(CheckoutError::NoPaymentMethod);
    }
    Ok(())
  }

  pub fn default_selection(&self) -> CheckoutSelection {
    CheckoutSelection {
      shipping_option_id: self.shipping_options.first().map(|o| o.id.clone()),
      payment_method: self.default_payment_method(),
    }
  }
}

/// The customer's staged shipping and payment choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutSelection {
  pub shipping_option_id: Option<String>,
  pub payment_method: Option<PaymentMethod>,
}

impl CheckoutSelection {
  pub fn with_payment_method(self, method: PaymentMethod, options: &CheckoutOptions) -> Result<Self, CheckoutError> {
    if !options.is_method_available(method) {
      return Err(CheckoutError::PaymentMethodUnavailable { method });
    }
    Ok(Self {
      payment_method: Some(method),
      ..self
    })
  }

  pub fn with_shipping_option(self, id: &str, options: &CheckoutOptions) -> Result<Self, CheckoutError> {
    if options.find_shipping(id).is_none() {
      return Err(CheckoutError::UnknownShippingOption { id: id.to_string() });
    }
    Ok(Self {
      shipping_option_id: Some(id.to_string()),
      ..self
    })
  }

  /// Keeps still-valid choices and replaces stale ones with the defaults,
  /// e.g. after an admin disabled the selected payment method.
  pub fn reconcile(self, options: &CheckoutOptions) -> Self {
    let payment_method = self
      .payment_method
      .filter(|m| options.is_method_available(*m))
      .or_else(|| options.default_payment_method());
    let shipping_option_id = options
      .resolve_shipping(self.shipping_option_id.as_deref())
      .map(|o| o.id.clone());
    Self {
      shipping_option_id,
      payment_method,
    }
  }

  pub fn quote(&self, items: &[CartItem], options: &CheckoutOptions) -> Result<PriceQuote, CheckoutError> {
    let method = self.payment_method.ok_or(CheckoutError::NoPaymentMethod)?;
    if !options.is_method_available(method) {
      return Err(CheckoutError::PaymentMethodUnavailable { method });
    }
    let shipping = options
      .resolve_shipping(self.shipping_option_id.as_deref())
      .ok_or(CheckoutError::NoShippingOption)?;
    Ok(quote(items, Some(shipping), method))
  }
}
