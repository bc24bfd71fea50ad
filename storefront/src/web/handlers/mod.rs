// storefront/storefront/src/web/handlers/mod.rs

pub mod auth_handlers;
pub mod message_handlers;
pub mod order_handlers;
pub mod page_data_handlers;
pub mod product_handlers;
pub mod settings_handlers;
