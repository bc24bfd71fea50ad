// storefront/storefront/src/seed.rs

//! First-start data: the settings document with a hashed admin credential
//! and a small sample catalog. Each collection is only seeded when empty.

use chrono::{Duration, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::auth_service;
use storefront_core::models::{
  CategoryImage, PaymentInfoStyles, ProductInput, Settings, ShippingOption, SliderImage, SocialMediaLink,
};
use storefront_core::Store;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
  pub settings_created: bool,
  pub products_created: usize,
}

#[instrument(name = "seed::seed_store", skip_all)]
pub async fn seed_store<S>(store: &S, config: &AppConfig) -> Result<SeedReport>
where
  S: Store + ?Sized,
{
  let mut report = SeedReport::default();

  if store.load_settings().await?.is_none() {
    let admin_hash = auth_service::hash_password(&config.seed_admin_password)?;
    store.save_settings(&default_settings(&config.seed_admin_email, admin_hash)).await?;
    report.settings_created = true;
    info!(admin_email = %config.seed_admin_email, "Default settings seeded.");
  }

  if store.count_products().await? == 0 {
    let now = Utc::now();
    for (offset, input) in sample_products().into_iter().enumerate() {
      // Spread creation times so "newest first" has a stable order.
      let created = now - Duration::minutes(offset as i64);
      store.insert_product(&input.into_product(Uuid::new_v4(), created)).await?;
      report.products_created += 1;
    }
    info!(count = report.products_created, "Sample products seeded.");
  }

  Ok(report)
}

fn strings(values: &[&str]) -> Vec<String> {
  values.iter().map(|v| v.to_string()).collect()
}

pub fn default_settings(admin_email: &str, admin_password_hash: String) -> Settings {
  let slider = |id: i64, title: &str, subtitle: &str, color: &str, seed: &str| SliderImage {
    id,
    title: title.to_string(),
    subtitle: subtitle.to_string(),
    color: color.to_string(),
    image: format!("https://picsum.photos/seed/sazo-{}-fashion/1200/500", seed),
    mobile_image: Some(format!("https://picsum.photos/seed/sazo-{}-mobile/400/500", seed)),
  };
  let category_image = |name: &str, seed: &str| CategoryImage {
    category_name: name.to_string(),
    image: format!("https://picsum.photos/seed/sazo-{}/600/800", seed),
  };
  let social = |platform: &str| SocialMediaLink {
    platform: platform.to_string(),
    url: "#".to_string(),
  };

  Settings {
    online_payment_info: "Payment Number:\n<b>01909285883</b> (Personal)".to_string(),
    online_payment_info_styles: PaymentInfoStyles::default(),
    cod_enabled: true,
    online_payment_enabled: true,
    online_payment_methods: strings(&["Bkash", "Nagad", "UPAY"]),
    slider_images: vec![
      slider(1, "The Festive Silk Collection", "Elegance and shimmer for every occasion.", "text-pink-600", "silk"),
      slider(2, "Comfortable Lawn Arrivals", "Breathe easy with our new cotton designs.", "text-blue-600", "lawn"),
      slider(3, "Grand Party Wear", "Unveil the ultimate glamour this season.", "text-purple-600", "party"),
    ],
    category_images: vec![
      category_image("Cotton", "cotton-fabric"),
      category_image("Silk", "silk-dress"),
      category_image("Party Wear", "party-fashion"),
    ],
    categories: strings(&["Cotton", "Silk", "Party Wear"]),
    shipping_options: vec![
      ShippingOption {
        id: "inside-dhaka".to_string(),
        label: "Inside Dhaka".to_string(),
        charge: 80,
      },
      ShippingOption {
        id: "outside-dhaka".to_string(),
        label: "Outside Dhaka".to_string(),
        charge: 150,
      },
    ],
    product_page_promo_image: "https://picsum.photos/seed/sazo-lifestyle-promo/1200/400".to_string(),
    contact_address: "Avenue 12, Gulshan-1, Dhaka, Bangladesh".to_string(),
    contact_phone: "+880 17XX XXX XXX".to_string(),
    contact_email: "support@sazo.com".to_string(),
    whatsapp_number: "+8801700000000".to_string(),
    show_whats_app_button: true,
    show_city_field: true,
    social_media_links: vec![social("Facebook"), social("Instagram"), social("Twitter")],
    privacy_policy: "We collect the details needed to deliver your order and never sell them.".to_string(),
    admin_email: admin_email.to_string(),
    admin_password: admin_password_hash,
    footer_description: "Discover elegance and style with SAZO.".to_string(),
    homepage_new_arrivals_count: 4,
    homepage_trending_count: 4,
  }
}

pub fn sample_products() -> Vec<ProductInput> {
  let product = |name: &str, category: &str, price: i64, fabric: &str, sizes: &[&str], flags: (bool, bool, bool)| {
    let seed = name.split_whitespace().next().unwrap_or("sazo").to_lowercase();
    ProductInput {
      name: name.to_string(),
      category: category.to_string(),
      price,
      description: format!("{} in {}.", name, fabric.to_lowercase()),
      fabric: fabric.to_string(),
      colors: Vec::new(),
      sizes: strings(sizes),
      is_new_arrival: flags.0,
      is_trending: flags.1,
      on_sale: flags.2,
      images: vec![format!("https://picsum.photos/seed/{}/400/500", seed)],
      display_order: None,
    }
  };

  vec![
    product("Gulmohar Lawn Suit", "Cotton", 3500, "Lawn Cotton", &["S", "M", "L", "XL", "Free"], (true, false, false)),
    product("Shalimar Silk Ensemble", "Silk", 6200, "Raw Silk", &["36", "38", "40", "42"], (true, true, false)),
    product("Party Princess Georgette", "Party Wear", 7800, "Georgette", &["Free"], (false, true, true)),
    product("Everyday Beige Cotton", "Cotton", 2800, "Cotton", &["38", "40", "42", "44", "46"], (false, false, true)),
    product("Mogra Chiffon", "Party Wear", 5900, "Chiffon", &["S", "M", "L"], (false, true, false)),
    product("Emerald Viscose", "Silk", 5500, "Viscose Silk", &["M", "L", "XL"], (true, true, false)),
    product("Maharani Velvet", "Party Wear", 9500, "Velvet", &["38", "40", "42", "44", "Free"], (true, true, true)),
    product("Zara Linen Kurti", "Cotton", 4100, "Linen", &["36", "38", "40", "42", "44", "46"], (false, true, false)),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sample_products_are_valid() {
    let products = sample_products();
    assert!(!products.is_empty());
    assert!(products.iter().all(|p| p.validate().is_ok()));
  }

  #[test]
  fn default_settings_allow_checkout() {
    let settings = default_settings("admin@sazo.com", "hash".to_string());
    assert!(settings.validate().is_ok());
    assert!(!settings.shipping_options.is_empty());
    assert!(settings.cod_enabled);
  }
}
