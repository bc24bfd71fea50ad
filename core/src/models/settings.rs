// storefront/core/src/models/settings.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

const ADMIN_PASSWORD_KEY: &str = "adminPassword";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
  pub id: String,
  pub label: String,
  pub charge: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SliderImage {
  pub id: i64,
  pub title: String,
  pub subtitle: String,
  pub color: String,
  pub image: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mobile_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryImage {
  pub category_name: String,
  pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialMediaLink {
  pub platform: String,
  pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentInfoStyles {
  pub font_size: String,
}

impl Default for PaymentInfoStyles {
  fn default() -> Self {
    Self {
      font_size: "0.875rem".to_string(),
    }
  }
}

/// The store-wide singleton configuration document.
///
/// `admin_password` holds an Argon2 hash and is stripped from every public
/// rendering (see [`Settings::to_public_json`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
  pub online_payment_info: String,
  pub online_payment_info_styles: PaymentInfoStyles,
  pub cod_enabled: bool,
  pub online_payment_enabled: bool,
  pub online_payment_methods: Vec<String>,
  pub slider_images: Vec<SliderImage>,
  pub category_images: Vec<CategoryImage>,
  pub categories: Vec<String>,
  pub shipping_options: Vec<ShippingOption>,
  pub product_page_promo_image: String,
  pub contact_address: String,
  pub contact_phone: String,
  pub contact_email: String,
  pub whatsapp_number: String,
  pub show_whats_app_button: bool,
  pub show_city_field: bool,
  pub social_media_links: Vec<SocialMediaLink>,
  pub privacy_policy: String,
  pub admin_email: String,
  pub admin_password: String,
  pub footer_description: String,
  pub homepage_new_arrivals_count: u32,
  pub homepage_trending_count: u32,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      online_payment_info: String::new(),
      online_payment_info_styles: PaymentInfoStyles::default(),
      cod_enabled: true,
      online_payment_enabled: true,
      online_payment_methods: Vec::new(),
      slider_images: Vec::new(),
      category_images: Vec::new(),
      categories: Vec::new(),
      shipping_options: Vec::new(),
      product_page_promo_image: String::new(),
      contact_address: String::new(),
      contact_phone: String::new(),
      contact_email: String::new(),
      whatsapp_number: String::new(),
      show_whats_app_button: false,
      show_city_field: true,
      social_media_links: Vec::new(),
      privacy_policy: String::new(),
      admin_email: String::new(),
      admin_password: String::new(),
      footer_description: String::new(),
      homepage_new_arrivals_count: 4,
      homepage_trending_count: 4,
    }
  }
}

/// Outcome of merging an admin patch. A new plain-text password is handed
/// back separately so the caller can hash it before saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsUpdate {
  pub settings: Settings,
  pub new_admin_password: Option<String>,
}

impl Settings {
  /// Renders the settings for public consumption, without the admin password.
  pub fn to_public_json(&self) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(self)?;
    if let Value::Object(map) = &mut value {
      map.remove(ADMIN_PASSWORD_KEY);
    }
    Ok(value)
  }

  /// Merges a partial JSON document into these settings.
  ///
  /// Keys absent from `patch` keep their current value; unknown keys are
  /// ignored. An empty `adminPassword` keeps the stored hash.
  pub fn merge_patch(&self, patch: Value) -> Result<SettingsUpdate, ValidationError> {
    let Value::Object(mut patch) = patch else {
      return Err(ValidationError::Malformed("settings patch must be a JSON object".to_string()));
    };

    let new_admin_password = match patch.remove(ADMIN_PASSWORD_KEY) {
      None | Some(Value::Null) => None,
      Some(Value::String(password)) if password.is_empty() => None,
      Some(Value::String(password)) => Some(password),
      Some(_) => {
        return Err(ValidationError::InvalidField {
          field: "adminPassword",
          reason: "must be a string",
        })
      }
    };

    let mut current = serde_json::to_value(self).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    if let Value::Object(map) = &mut current {
      for (key, value) in patch {
        map.insert(key, value);
      }
    }
    let settings: Settings = serde_json::from_value(current).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    settings.validate()?;

    Ok(SettingsUpdate {
      settings,
      new_admin_password,
    })
  }

  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.admin_email.trim().is_empty() {
      return Err(ValidationError::InvalidField {
        field: "adminEmail",
        reason: "is required",
      });
    }
    if self.shipping_options.iter().any(|o| o.charge < 0) {
      return Err(ValidationError::InvalidField {
        field: "shippingOptions",
        reason: "charges must not be negative",
      });
    }
    if self.shipping_options.iter().any(|o| o.id.trim().is_empty()) {
      return Err(ValidationError::InvalidField {
        field: "shippingOptions",
        reason: "every option needs an id",
      });
    }
    Ok(())
  }
}
