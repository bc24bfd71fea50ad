// storefront/storefront/tests/api_tests.rs

mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use common::*;
use serde_json::{json, Value};
use storefront::web::{configure_app_routes, json_config};
use storefront_core::models::{Order, OrderStatus, Product};
use storefront_core::ProductStore;

macro_rules! test_app {
  ($state:expr) => {
    test::init_service(
      App::new()
        .app_data(web::Data::new($state.clone()))
        .app_data(json_config($state.config.json_payload_limit_bytes))
        .configure(configure_app_routes),
    )
    .await
  };
}

macro_rules! login {
  ($app:expr) => {{
    let req = test::TestRequest::post()
      .uri("/api/auth/login")
      .set_json(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
      .to_request();
    let resp = test::call_service(&$app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    body["token"].as_str().expect("login returns a token").to_string()
  }};
}

fn bearer(token: &str) -> (&'static str, String) {
  ("Authorization", format!("Bearer {}", token))
}

async fn first_product(store: &storefront_core::MemoryStore) -> Product {
  store.list_products().await.unwrap().into_iter().next().expect("catalog is seeded")
}

#[actix_web::test]
async fn health_reports_ok() {
  let (state, _store) = empty_state();
  let app = test_app!(state);
  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn placing_an_order_returns_pending_order_with_short_id() {
  let (state, store) = seeded_state(&[]).await;
  let app = test_app!(state);
  let product = first_product(&store).await;

  let req = test::TestRequest::post()
    .uri("/api/orders")
    .set_json(cod_order_body(&product, 2))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let order: Order = test::read_body_json(resp).await;
  assert_eq!(order.status, OrderStatus::Pending);
  assert!((5..=7).contains(&order.order_id.len()));
  assert!(order.order_id.chars().all(|c| c.is_ascii_digit()));
  assert_eq!(order.total, product.price * 2 + 80);
  assert!(order.payment_details.is_none());
  assert_eq!(store.order_count(), 1);
}

#[actix_web::test]
async fn empty_cart_is_rejected_without_writing() {
  let (state, store) = seeded_state(&[]).await;
  let app = test_app!(state);
  let product = first_product(&store).await;

  let mut body = cod_order_body(&product, 1);
  body["cartItems"] = json!([]);
  let resp = test::call_service(&app, test::TestRequest::post().uri("/api/orders").set_json(body).to_request()).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["message"], "Cart is empty");
  assert_eq!(store.order_count(), 0);
}

#[actix_web::test]
async fn understated_total_is_rejected() {
  let (state, store) = seeded_state(&[]).await;
  let app = test_app!(state);
  let product = first_product(&store).await;

  let mut body = cod_order_body(&product, 1);
  body["total"] = json!(1);
  let resp = test::call_service(&app, test::TestRequest::post().uri("/api/orders").set_json(body).to_request()).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(store.order_count(), 0);
}

#[actix_web::test]
async fn out_of_range_line_total_is_rejected() {
  let (state, store) = seeded_state(&[]).await;
  let app = test_app!(state);
  let product = first_product(&store).await;

  let mut body = cod_order_body(&product, 2);
  body["cartItems"][0]["price"] = json!(i64::MAX / 2 + 1);
  body["total"] = json!(1);
  body["shippingOptionId"] = Value::Null;
  let resp = test::call_service(&app, test::TestRequest::post().uri("/api/orders").set_json(body).to_request()).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(store.order_count(), 0);
}

#[actix_web::test]
async fn order_lookup_accepts_both_identifiers() {
  let (state, store) = seeded_state(&[]).await;
  let app = test_app!(state);
  let product = first_product(&store).await;

  let resp = test::call_service(
    &app,
    test::TestRequest::post().uri("/api/orders").set_json(cod_order_body(&product, 1)).to_request(),
  )
  .await;
  let created: Order = test::read_body_json(resp).await;

  for reference in [created.order_id.clone(), created.id.to_string()] {
    let resp = test::call_service(
      &app,
      test::TestRequest::get().uri(&format!("/api/orders/{}", reference)).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK, "lookup by {}", reference);
    let found: Order = test::read_body_json(resp).await;
    assert_eq!(found.id, created.id);
  }

  for missing in ["1234", "not-an-id", "99999999"] {
    let resp = test::call_service(&app, test::TestRequest::get().uri(&format!("/api/orders/{}", missing)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND, "lookup by {}", missing);
  }
}

#[actix_web::test]
async fn admin_routes_require_a_valid_token() {
  let (state, _store) = seeded_state(&[]).await;
  let app = test_app!(state);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/orders").to_request()).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let resp = test::call_service(
    &app,
    test::TestRequest::get().uri("/api/messages").insert_header(bearer("forged")).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let token = login!(app);
  let resp = test::call_service(
    &app,
    test::TestRequest::get().uri("/api/orders").insert_header(bearer(&token)).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn wrong_password_is_unauthorized() {
  let (state, _store) = seeded_state(&[]).await;
  let app = test_app!(state);
  let req = test::TestRequest::post()
    .uri("/api/auth/login")
    .set_json(json!({ "email": ADMIN_EMAIL, "password": "guess" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn logout_revokes_the_token() {
  let (state, _store) = seeded_state(&[]).await;
  let app = test_app!(state);
  let token = login!(app);

  let resp = test::call_service(
    &app,
    test::TestRequest::post().uri("/api/auth/logout").insert_header(bearer(&token)).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);

  let resp = test::call_service(
    &app,
    test::TestRequest::get().uri("/api/orders").insert_header(bearer(&token)).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn status_update_and_delete_use_the_internal_id() {
  let (state, store) = seeded_state(&[]).await;
  let app = test_app!(state);
  let product = first_product(&store).await;
  let token = login!(app);

  let resp = test::call_service(
    &app,
    test::TestRequest::post().uri("/api/orders").set_json(cod_order_body(&product, 1)).to_request(),
  )
  .await;
  let created: Order = test::read_body_json(resp).await;

  let resp = test::call_service(
    &app,
    test::TestRequest::put()
      .uri(&format!("/api/orders/{}/status", created.order_id))
      .insert_header(bearer(&token))
      .set_json(json!({ "status": "Shipped" }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let resp = test::call_service(
    &app,
    test::TestRequest::put()
      .uri(&format!("/api/orders/{}/status", created.id))
      .insert_header(bearer(&token))
      .set_json(json!({ "status": "Teleported" }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let resp = test::call_service(
    &app,
    test::TestRequest::put()
      .uri(&format!("/api/orders/{}/status", created.id))
      .insert_header(bearer(&token))
      .set_json(json!({ "status": "Shipped" }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let updated: Order = test::read_body_json(resp).await;
  assert_eq!(updated.status, OrderStatus::Shipped);
  assert_eq!(updated.order_id, created.order_id);

  let delete = |id: String| {
    test::TestRequest::delete()
      .uri(&format!("/api/orders/{}", id))
      .insert_header(bearer(&token))
      .to_request()
  };
  let resp = test::call_service(&app, delete(created.id.to_string())).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let resp = test::call_service(&app, delete(created.id.to_string())).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(store.order_count(), 0);
}

#[actix_web::test]
async fn public_settings_never_expose_the_admin_password() {
  let (state, _store) = seeded_state(&[]).await;
  let app = test_app!(state);

  for uri in ["/api/settings", "/api/page-data/home"] {
    let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let settings = if uri == "/api/settings" { &body } else { &body["settings"] };
    assert!(settings.get("adminPassword").is_none(), "{} leaked the password", uri);
    assert_eq!(settings["adminEmail"], ADMIN_EMAIL);
  }
}

#[actix_web::test]
async fn home_bundle_lists_featured_products_in_display_order() {
  let (state, _store) = seeded_state(&[]).await;
  let app = test_app!(state);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/page-data/home").to_request()).await;
  let body: Value = test::read_body_json(resp).await;
  let products: Vec<Product> = serde_json::from_value(body["products"].clone()).unwrap();
  assert!(!products.is_empty());
  assert!(products.iter().all(|p| p.is_new_arrival || p.is_trending));
  assert!(products.iter().all(|p| p.name != "Everyday Beige Cotton"));
}

#[actix_web::test]
async fn home_bundle_is_not_found_without_settings() {
  let (state, _store) = empty_state();
  let app = test_app!(state);
  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/page-data/home").to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["message"], "Settings not found");
}

#[actix_web::test]
async fn settings_update_merges_and_rehashes_password() {
  let (state, _store) = seeded_state(&[]).await;
  let app = test_app!(state);
  let token = login!(app);

  let resp = test::call_service(
    &app,
    test::TestRequest::put()
      .uri("/api/settings")
      .insert_header(bearer(&token))
      .set_json(json!({ "codEnabled": false, "adminPassword": "new-pass-123" }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["codEnabled"], false);
  assert_eq!(body["onlinePaymentEnabled"], true);
  assert!(body.get("adminPassword").is_none());

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/api/auth/login")
      .set_json(json!({ "email": ADMIN_EMAIL, "password": "new-pass-123" }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn admin_products_are_paginated_and_searchable() {
  let (state, _store) = seeded_state(&[("ADMIN_PRODUCTS_PAGE_SIZE", "3")]).await;
  let app = test_app!(state);
  let token = login!(app);

  let resp = test::call_service(
    &app,
    test::TestRequest::get().uri("/api/products/admin?page=2").insert_header(bearer(&token)).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["page"], 2);
  assert_eq!(body["pages"], 3);
  assert_eq!(body["total"], 8);
  assert_eq!(body["products"].as_array().map(Vec::len), Some(3));

  let resp = test::call_service(
    &app,
    test::TestRequest::get()
      .uri("/api/products/admin?search=SILK")
      .insert_header(bearer(&token))
      .to_request(),
  )
  .await;
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["total"], 1);
  assert_eq!(body["products"][0]["name"], "Shalimar Silk Ensemble");
}

#[actix_web::test]
async fn product_crud_round_trip() {
  let (state, _store) = seeded_state(&[]).await;
  let app = test_app!(state);
  let token = login!(app);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/api/products")
      .insert_header(bearer(&token))
      .set_json(json!({ "name": "Nilambori Muslin", "category": "Silk", "price": 8800, "sizes": ["Free"] }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let created: Product = test::read_body_json(resp).await;

  let resp = test::call_service(
    &app,
    test::TestRequest::put()
      .uri(&format!("/api/products/{}", created.id))
      .insert_header(bearer(&token))
      .set_json(json!({ "name": "Nilambori Muslin", "category": "Silk", "price": 7900, "sizes": ["Free"] }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let updated: Product = test::read_body_json(resp).await;
  assert_eq!(updated.price, 7900);
  assert_eq!(updated.created_at, created.created_at);

  let resp = test::call_service(
    &app,
    test::TestRequest::delete()
      .uri(&format!("/api/products/{}", created.id))
      .insert_header(bearer(&token))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);

  let resp = test::call_service(
    &app,
    test::TestRequest::get().uri(&format!("/api/products/{}", created.id)).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn contact_messages_flow() {
  let (state, _store) = seeded_state(&[]).await;
  let app = test_app!(state);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/api/messages")
      .set_json(json!({ "name": "Tahmina", "email": "tahmina@example.com", "message": "Do you ship to Sylhet?" }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let sent: Value = test::read_body_json(resp).await;
  let id = sent["id"].as_str().unwrap().to_string();
  assert_eq!(sent["isRead"], false);

  let token = login!(app);
  let resp = test::call_service(
    &app,
    test::TestRequest::put()
      .uri(&format!("/api/messages/{}/read", id))
      .insert_header(bearer(&token))
      .set_json(json!({ "isRead": true }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let read: Value = test::read_body_json(resp).await;
  assert_eq!(read["isRead"], true);

  let resp = test::call_service(
    &app,
    test::TestRequest::delete()
      .uri(&format!("/api/messages/{}", id))
      .insert_header(bearer(&token))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);

  let resp = test::call_service(
    &app,
    test::TestRequest::get().uri("/api/messages").insert_header(bearer(&token)).to_request(),
  )
  .await;
  let messages: Value = test::read_body_json(resp).await;
  assert_eq!(messages.as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn malformed_json_is_a_validation_error() {
  let (state, _store) = seeded_state(&[]).await;
  let app = test_app!(state);
  let req = test::TestRequest::post()
    .uri("/api/orders")
    .insert_header(("Content-Type", "application/json"))
    .set_payload("{ not json")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));
}
