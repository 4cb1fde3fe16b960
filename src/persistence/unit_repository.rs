//! Unit Repository
//!
//! SQLite implementation of the unit directory.

use async_trait::async_trait;
use tracing::{debug, error};

use super::models::UnitRecord;
use super::DbPool;
use crate::domain::entities::unit::StorageUnit;
use crate::domain::errors::{InventoryError, InventoryResult};
use crate::domain::repositories::unit_directory::UnitDirectory;

pub struct SqliteUnitDirectory {
    pool: DbPool,
}

impl SqliteUnitDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitDirectory for SqliteUnitDirectory {
    async fn get_unit(&self, unit_id: &str) -> InventoryResult<Option<StorageUnit>> {
        let record = sqlx::query_as::<_, UnitRecord>("SELECT * FROM units WHERE id = ?1")
            .bind(unit_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to get unit {}: {}", unit_id, e);
                InventoryError::PersistenceUnavailable(format!("Failed to get unit: {}", e))
            })?;

        Ok(record.map(StorageUnit::from))
    }

    async fn list_units(&self) -> InventoryResult<Vec<StorageUnit>> {
        let records = sqlx::query_as::<_, UnitRecord>("SELECT * FROM units")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to list units: {}", e);
                InventoryError::PersistenceUnavailable(format!("Failed to list units: {}", e))
            })?;

        Ok(records.into_iter().map(StorageUnit::from).collect())
    }

    async fn list_unit_ids(&self) -> InventoryResult<Vec<String>> {
        let ids: Vec<(String,)> = sqlx::query_as("SELECT id FROM units")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to list unit ids: {}", e);
                InventoryError::PersistenceUnavailable(format!("Failed to list unit ids: {}", e))
            })?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    async fn insert_unit(&self, unit: &StorageUnit) -> InventoryResult<()> {
        sqlx::query("INSERT INTO units (id, name, capacity) VALUES (?1, ?2, ?3)")
            .bind(&unit.id)
            .bind(&unit.name)
            .bind(unit.capacity)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    InventoryError::DuplicateIdentifier(unit.id.clone())
                }
                _ => {
                    error!("Failed to insert unit {}: {}", unit.id, e);
                    InventoryError::PersistenceUnavailable(format!("Failed to insert unit: {}", e))
                }
            })?;

        debug!("Provisioned unit {} ({})", unit.id, unit.name);
        Ok(())
    }

    async fn insert_units(&self, units: &[StorageUnit]) -> InventoryResult<()> {
        let mut tx = self.pool.begin().await?;

        for unit in units {
            sqlx::query("INSERT INTO units (id, name, capacity) VALUES (?1, ?2, ?3)")
                .bind(&unit.id)
                .bind(&unit.name)
                .bind(unit.capacity)
                .execute(&mut *tx)
                .await
                .map_err(|e| match &e {
                    sqlx::Error::Database(db) if db.is_unique_violation() => {
                        InventoryError::DuplicateIdentifier(unit.id.clone())
                    }
                    _ => {
                        error!("Failed to insert unit {}: {}", unit.id, e);
                        InventoryError::PersistenceUnavailable(format!(
                            "Failed to insert unit: {}",
                            e
                        ))
                    }
                })?;
        }

        tx.commit().await?;
        debug!("Provisioned {} units", units.len());
        Ok(())
    }
}
