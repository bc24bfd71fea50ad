// storefront/storefront/src/db/pg_store.rs

//! Postgres document store. Each collection is a table of JSONB documents.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use storefront_core::models::{ContactMessage, Order, OrderStatus, Product, Settings};
use storefront_core::{
  MessageStore, OrderStore, ProductPage, ProductQuery, ProductStore, SettingsStore, StoreError, StoreResult,
};

#[derive(Debug, Clone)]
pub struct PgStore {
  pool: PgPool,
}

fn backend(err: sqlx::Error) -> StoreError {
  StoreError::from(anyhow::Error::new(err))
}

/// Escapes `%`, `_` and `\` so user input matches literally inside ILIKE.
fn escape_like(raw: &str) -> String {
  let mut escaped = String::with_capacity(raw.len());
  for c in raw.chars() {
    if matches!(c, '%' | '_' | '\\') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
    let pool = PgPoolOptions::new()
      .max_connections(max_connections)
      .connect(database_url)
      .await?;
    Ok(Self::new(pool))
  }

  pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(&self.pool).await?;
    info!("Database migrations applied.");
    Ok(())
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }
}

#[async_trait]
impl OrderStore for PgStore {
  #[instrument(name = "PgStore::insert_order", skip_all, fields(order_id = %order.order_id), err(Display))]
  async fn insert_order(&self, order: &Order) -> StoreResult<()> {
    let result = sqlx::query("INSERT INTO orders (id, order_id, data, created_at) VALUES ($1, $2, $3, $4)")
      .bind(order.id)
      .bind(&order.order_id)
      .bind(Json(order))
      .bind(order.created_at)
      .execute(&self.pool)
      .await;

    match result {
      Ok(_) => Ok(()),
      Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
        warn!("Unique index rejected order identifier.");
        Err(StoreError::DuplicateOrderId {
          order_id: order.order_id.clone(),
        })
      }
      Err(e) => Err(backend(e)),
    }
  }

  async fn order_id_exists(&self, order_id: &str) -> StoreResult<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM orders WHERE order_id = $1)")
      .bind(order_id)
      .fetch_one(&self.pool)
      .await
      .map_err(backend)
  }

  async fn find_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
    let row = sqlx::query_scalar::<_, Json<Order>>("SELECT data FROM orders WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(backend)?;
    Ok(row.map(|Json(order)| order))
  }

  async fn find_order_by_order_id(&self, order_id: &str) -> StoreResult<Option<Order>> {
    let row = sqlx::query_scalar::<_, Json<Order>>("SELECT data FROM orders WHERE order_id = $1")
      .bind(order_id)
      .fetch_optional(&self.pool)
      .await
      .map_err(backend)?;
    Ok(row.map(|Json(order)| order))
  }

  async fn list_orders(&self) -> StoreResult<Vec<Order>> {
    let rows = sqlx::query_scalar::<_, Json<Order>>("SELECT data FROM orders ORDER BY created_at DESC")
      .fetch_all(&self.pool)
      .await
      .map_err(backend)?;
    Ok(rows.into_iter().map(|Json(order)| order).collect())
  }

  async fn update_order_status(&self, id: Uuid, status: OrderStatus, at: DateTime<Utc>) -> StoreResult<Option<Order>> {
    let mut tx = self.pool.begin().await.map_err(backend)?;
    let current = sqlx::query_scalar::<_, Json<Order>>("SELECT data FROM orders WHERE id = $1 FOR UPDATE")
      .bind(id)
      .fetch_optional(&mut *tx)
      .await
      .map_err(backend)?;
    let Some(Json(mut order)) = current else {
      return Ok(None);
    };

    order.status = status;
    order.updated_at = at;
    sqlx::query("UPDATE orders SET data = $2 WHERE id = $1")
      .bind(id)
      .bind(Json(&order))
      .execute(&mut *tx)
      .await
      .map_err(backend)?;
    tx.commit().await.map_err(backend)?;
    Ok(Some(order))
  }

  async fn delete_order(&self, id: Uuid) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(backend)?;
    Ok(result.rows_affected() > 0)
  }
}

#[async_trait]
impl ProductStore for PgStore {
  async fn insert_product(&self, product: &Product) -> StoreResult<()> {
    sqlx::query(
      "INSERT INTO products (id, data, display_order, created_at, updated_at) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(product.id)
    .bind(Json(product))
    .bind(product.display_order)
    .bind(product.created_at)
    .bind(product.updated_at)
    .execute(&self.pool)
    .await
    .map_err(backend)?;
    Ok(())
  }

  async fn find_product(&self, id: Uuid) -> StoreResult<Option<Product>> {
    let row = sqlx::query_scalar::<_, Json<Product>>("SELECT data FROM products WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(backend)?;
    Ok(row.map(|Json(product)| product))
  }

  async fn replace_product(&self, product: &Product) -> StoreResult<bool> {
    let result = sqlx::query("UPDATE products SET data = $2, display_order = $3, updated_at = $4 WHERE id = $1")
      .bind(product.id)
      .bind(Json(product))
      .bind(product.display_order)
      .bind(product.updated_at)
      .execute(&self.pool)
      .await
      .map_err(backend)?;
    Ok(result.rows_affected() > 0)
  }

  async fn delete_product(&self, id: Uuid) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(backend)?;
    Ok(result.rows_affected() > 0)
  }

  async fn list_products(&self) -> StoreResult<Vec<Product>> {
    let rows = sqlx::query_scalar::<_, Json<Product>>("SELECT data FROM products ORDER BY created_at DESC")
      .fetch_all(&self.pool)
      .await
      .map_err(backend)?;
    Ok(rows.into_iter().map(|Json(product)| product).collect())
  }

  async fn featured_products(&self) -> StoreResult<Vec<Product>> {
    let rows = sqlx::query_scalar::<_, Json<Product>>(
      "SELECT data FROM products \
       WHERE COALESCE((data->>'isNewArrival')::boolean, false) OR COALESCE((data->>'isTrending')::boolean, false) \
       ORDER BY display_order ASC, created_at DESC",
    )
    .fetch_all(&self.pool)
    .await
    .map_err(backend)?;
    Ok(rows.into_iter().map(|Json(product)| product).collect())
  }

  #[instrument(name = "PgStore::query_products", skip(self), err(Display))]
  async fn query_products(&self, query: &ProductQuery) -> StoreResult<ProductPage> {
    let pattern = query.search.as_deref().map(|s| format!("%{}%", escape_like(s)));

    let total = sqlx::query_scalar::<_, i64>(
      "SELECT COUNT(*) FROM products WHERE ($1::text IS NULL OR data->>'name' ILIKE $1)",
    )
    .bind(pattern.as_deref())
    .fetch_one(&self.pool)
    .await
    .map_err(backend)?;

    let rows = sqlx::query_scalar::<_, Json<Product>>(
      "SELECT data FROM products WHERE ($1::text IS NULL OR data->>'name' ILIKE $1) \
       ORDER BY created_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(pattern.as_deref())
    .bind(i64::from(query.page_size))
    .bind(i64::try_from(query.offset()).unwrap_or(i64::MAX))
    .fetch_all(&self.pool)
    .await
    .map_err(backend)?;

    let products = rows.into_iter().map(|Json(product)| product).collect();
    Ok(ProductPage::new(
      products,
      query.page,
      query.page_size,
      u64::try_from(total).unwrap_or_default(),
    ))
  }

  async fn count_products(&self) -> StoreResult<u64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
      .fetch_one(&self.pool)
      .await
      .map_err(backend)?;
    Ok(u64::try_from(count).unwrap_or_default())
  }
}

#[async_trait]
impl SettingsStore for PgStore {
  async fn load_settings(&self) -> StoreResult<Option<Settings>> {
    let row = sqlx::query_scalar::<_, Json<Settings>>("SELECT data FROM settings WHERE singleton")
      .fetch_optional(&self.pool)
      .await
      .map_err(backend)?;
    Ok(row.map(|Json(settings)| settings))
  }

  async fn save_settings(&self, settings: &Settings) -> StoreResult<()> {
    sqlx::query(
      "INSERT INTO settings (singleton, data, updated_at) VALUES (TRUE, $1, NOW()) \
       ON CONFLICT (singleton) DO UPDATE SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at",
    )
    .bind(Json(settings))
    .execute(&self.pool)
    .await
    .map_err(backend)?;
    Ok(())
  }
}

#[async_trait]
impl MessageStore for PgStore {
  async fn insert_message(&self, message: &ContactMessage) -> StoreResult<()> {
    sqlx::query("INSERT INTO contact_messages (id, data, created_at) VALUES ($1, $2, $3)")
      .bind(message.id)
      .bind(Json(message))
      .bind(message.created_at)
      .execute(&self.pool)
      .await
      .map_err(backend)?;
    Ok(())
  }

  async fn list_messages(&self) -> StoreResult<Vec<ContactMessage>> {
    let rows = sqlx::query_scalar::<_, Json<ContactMessage>>("SELECT data FROM contact_messages ORDER BY created_at DESC")
      .fetch_all(&self.pool)
      .await
      .map_err(backend)?;
    Ok(rows.into_iter().map(|Json(message)| message).collect())
  }

  async fn set_message_read(&self, id: Uuid, is_read: bool) -> StoreResult<Option<ContactMessage>> {
    let row = sqlx::query_scalar::<_, Json<ContactMessage>>(
      "UPDATE contact_messages SET data = jsonb_set(data, '{isRead}', to_jsonb($2::boolean)) WHERE id = $1 RETURNING data",
    )
    .bind(id)
    .bind(is_read)
    .fetch_optional(&self.pool)
    .await
    .map_err(backend)?;
    Ok(row.map(|Json(message)| message))
  }

  async fn delete_message(&self, id: Uuid) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(backend)?;
    Ok(result.rows_affected() > 0)
  }
}
