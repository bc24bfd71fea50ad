// storefront/core/src/models/mod.rs

//! Documents persisted by the store and exchanged over the REST API.
//! Field names follow the camelCase JSON the storefront client speaks.

pub mod cart_item;
pub mod message;
pub mod order;
pub mod product;
pub mod settings;

pub use cart_item::CartItem;
pub use message::{ContactMessage, ContactMessageInput};
pub use order::{CustomerDetails, Order, OrderDraft, OrderRequest, OrderStatus, PaymentDetails, PaymentInfo, PaymentMethod};
pub use product::{Product, ProductInput, DEFAULT_DISPLAY_ORDER, FREE_SIZE};
pub use settings::{
  CategoryImage, PaymentInfoStyles, Settings, SettingsUpdate, ShippingOption, SliderImage, SocialMediaLink,
};
