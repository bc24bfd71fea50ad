// storefront/storefront/src/web/routes.rs

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::errors::AppError;
use crate::web::handlers::{
  auth_handlers, message_handlers, order_handlers, page_data_handlers, product_handlers, settings_handlers,
};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// JSON body limits and the error shape for unreadable bodies.
pub fn json_config(limit_bytes: usize) -> web::JsonConfig {
  web::JsonConfig::default()
    .limit(limit_bytes)
    .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
      tracing::warn!(error = %err, "Rejected unreadable JSON body.");
      AppError::Validation(format!("Invalid request body: {}", err)).into()
    })
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/auth")
          .route("/login", web::post().to(auth_handlers::login_handler))
          .route("/logout", web::post().to(auth_handlers::logout_handler)),
      )
      .service(
        web::scope("/orders")
          .route("", web::get().to(order_handlers::list_orders_handler))
          .route("", web::post().to(order_handlers::create_order_handler))
          .route("/{id}", web::get().to(order_handlers::get_order_handler))
          .route("/{id}", web::delete().to(order_handlers::delete_order_handler))
          .route("/{id}/status", web::put().to(order_handlers::update_order_status_handler)),
      )
      // `/admin` is registered ahead of `/{product_id}` so it is not read as an id.
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("", web::post().to(product_handlers::create_product_handler))
          .route("/admin", web::get().to(product_handlers::admin_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
          .route("/{product_id}", web::put().to(product_handlers::update_product_handler))
          .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler)),
      )
      .route("/page-data/home", web::get().to(page_data_handlers::home_page_data_handler))
      .service(
        web::scope("/settings")
          .route("", web::get().to(settings_handlers::get_settings_handler))
          .route("", web::put().to(settings_handlers::update_settings_handler)),
      )
      .service(
        web::scope("/messages")
          .route("", web::get().to(message_handlers::list_messages_handler))
          .route("", web::post().to(message_handlers::send_message_handler))
          .route("/{id}/read", web::put().to(message_handlers::set_message_read_handler))
          .route("/{id}", web::delete().to(message_handlers::delete_message_handler)),
      ),
  );
}
