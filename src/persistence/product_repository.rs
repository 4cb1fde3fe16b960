//! Product Repository
//!
//! SQLite implementation of the product ledger. Stock mutations are single
//! conditional `UPDATE ... RETURNING` statements keyed by product id, so the
//! quantity guard and the write can never see different states.

use async_trait::async_trait;
use tracing::{debug, error};

use super::models::{FootprintRow, ProductRecord};
use super::DbPool;
use crate::domain::entities::product::Product;
use crate::domain::errors::{InventoryError, InventoryResult};
use crate::domain::repositories::product_ledger::{
    ProductLedger, SearchQuery, StockFootprint,
};

pub struct SqliteProductLedger {
    pool: DbPool,
}

impl SqliteProductLedger {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn insert_row<'e, E>(executor: E, product: &Product) -> InventoryResult<ProductRecord>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query_as::<_, ProductRecord>(
            r#"
            INSERT INTO products (
                id, name, quantity, sold_quantity, weight, volume,
                category, purchase_price, selling_price, manufacturer,
                unit_gain, unit_id
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            RETURNING *
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.quantity)
        .bind(product.sold_quantity)
        .bind(product.weight)
        .bind(product.volume)
        .bind(&product.category)
        .bind(product.purchase_price)
        .bind(product.selling_price)
        .bind(&product.manufacturer)
        .bind(product.unit_gain)
        .bind(&product.unit_id)
        .fetch_one(executor)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                InventoryError::DuplicateIdentifier(product.id.clone())
            }
            _ => {
                error!("Failed to insert product {}: {}", product.id, e);
                InventoryError::PersistenceUnavailable(format!("Failed to insert product: {}", e))
            }
        })
    }
}

#[async_trait]
impl ProductLedger for SqliteProductLedger {
    async fn get_by_id(&self, id: &str) -> InventoryResult<Option<Product>> {
        let record = sqlx::query_as::<_, ProductRecord>("SELECT * FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to get product {}: {}", id, e);
                InventoryError::PersistenceUnavailable(format!("Failed to get product: {}", e))
            })?;

        Ok(record.map(Product::from))
    }

    async fn list_all(&self) -> InventoryResult<Vec<Product>> {
        let records = sqlx::query_as::<_, ProductRecord>("SELECT * FROM products")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to list products: {}", e);
                InventoryError::PersistenceUnavailable(format!("Failed to list products: {}", e))
            })?;

        Ok(records.into_iter().map(Product::from).collect())
    }

    async fn list_by_unit(&self, unit_id: &str) -> InventoryResult<Vec<Product>> {
        let records =
            sqlx::query_as::<_, ProductRecord>("SELECT * FROM products WHERE unit_id = ?1")
                .bind(unit_id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    error!("Failed to list products for unit {}: {}", unit_id, e);
                    InventoryError::PersistenceUnavailable(format!(
                        "Failed to list products: {}",
                        e
                    ))
                })?;

        Ok(records.into_iter().map(Product::from).collect())
    }

    async fn stock_footprint(&self, unit_id: &str) -> InventoryResult<Vec<StockFootprint>> {
        let rows = sqlx::query_as::<_, FootprintRow>(
            "SELECT quantity, volume FROM products WHERE unit_id = ?1",
        )
        .bind(unit_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to get stock footprint for unit {}: {}", unit_id, e);
            InventoryError::PersistenceUnavailable(format!("Failed to get footprint: {}", e))
        })?;

        Ok(rows.into_iter().map(StockFootprint::from).collect())
    }

    async fn insert(&self, product: &Product) -> InventoryResult<Product> {
        let record = Self::insert_row(&self.pool, product).await?;
        debug!("Inserted product {} into unit {}", record.id, record.unit_id);
        Ok(Product::from(record))
    }

    async fn insert_batch(&self, products: &[Product]) -> InventoryResult<Vec<String>> {
        let mut tx = self.pool.begin().await?;

        let mut ids = Vec::with_capacity(products.len());
        for product in products {
            let record = Self::insert_row(&mut *tx, product).await?;
            ids.push(record.id);
        }

        tx.commit().await?;
        debug!("Inserted batch of {} product rows", ids.len());
        Ok(ids)
    }

    async fn increment_stock(
        &self,
        id: &str,
        quantity_delta: i64,
        gain_delta: f64,
    ) -> InventoryResult<Product> {
        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            UPDATE products
            SET quantity = quantity + ?1,
                unit_gain = unit_gain + ?2,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?3
            RETURNING *
            "#,
        )
        .bind(quantity_delta)
        .bind(gain_delta)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to increment stock for product {}: {}", id, e);
            InventoryError::PersistenceUnavailable(format!("Failed to update product: {}", e))
        })?;

        // no row matched: deleted out from under us between fetch and write
        let record = record.ok_or_else(|| InventoryError::ProductNotFound(id.to_string()))?;

        debug!(
            "Incremented product {}: quantity delta {}, gain delta {}",
            id, quantity_delta, gain_delta
        );
        Ok(Product::from(record))
    }

    async fn decrement_stock_guarded(
        &self,
        id: &str,
        sell_quantity: i64,
        gain_delta: f64,
    ) -> InventoryResult<Product> {
        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            UPDATE products
            SET quantity = quantity - ?1,
                sold_quantity = sold_quantity + ?1,
                unit_gain = unit_gain + ?2,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?3 AND quantity >= ?1
            RETURNING *
            "#,
        )
        .bind(sell_quantity)
        .bind(gain_delta)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to decrement stock for product {}: {}", id, e);
            InventoryError::PersistenceUnavailable(format!("Failed to update product: {}", e))
        })?;

        let record = record.ok_or_else(|| InventoryError::InsufficientStock {
            product_id: id.to_string(),
            requested: sell_quantity,
        })?;

        debug!(
            "Decremented product {}: sold {}, gain delta {}",
            id, sell_quantity, gain_delta
        );
        Ok(Product::from(record))
    }

    async fn search(&self, query: &SearchQuery) -> InventoryResult<Vec<Product>> {
        // window bounds are validated before the database is touched
        let window = query.window()?;

        let mut sql = String::from("SELECT * FROM products WHERE 1=1");
        if query.name.is_some() {
            sql.push_str(" AND name = ?");
        }
        if query.product_id.is_some() {
            sql.push_str(" AND id = ?");
        }
        if query.unit_id.is_some() {
            sql.push_str(" AND unit_id = ?");
        }
        if let Some((field, direction)) = query.ordering() {
            // ORDER BY is assembled from a whitelist, never from caller input
            sql.push_str(&format!(
                " ORDER BY {} {}",
                field.column(),
                direction.keyword()
            ));
        }
        if window.is_some() {
            sql.push_str(" LIMIT ? OFFSET ?");
        }

        let mut q = sqlx::query_as::<_, ProductRecord>(&sql);
        if let Some(name) = &query.name {
            q = q.bind(name);
        }
        if let Some(product_id) = &query.product_id {
            q = q.bind(product_id);
        }
        if let Some(unit_id) = &query.unit_id {
            q = q.bind(unit_id);
        }
        if let Some((offset, limit)) = window {
            q = q.bind(limit).bind(offset);
        }

        let records = q.fetch_all(&self.pool).await.map_err(|e| {
            error!("Product search failed: {}", e);
            InventoryError::PersistenceUnavailable(format!("Product search failed: {}", e))
        })?;

        Ok(records.into_iter().map(Product::from).collect())
    }
}
