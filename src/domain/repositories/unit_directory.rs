//! Unit Directory Trait
//!
//! Registry of storage units behind the persistence boundary. Read-mostly:
//! units are provisioned once and only read afterwards.

use async_trait::async_trait;

use crate::domain::entities::unit::StorageUnit;
use crate::domain::errors::InventoryResult;

#[async_trait]
pub trait UnitDirectory: Send + Sync {
    /// Point lookup by unit id.
    async fn get_unit(&self, unit_id: &str) -> InventoryResult<Option<StorageUnit>>;

    /// All provisioned units, order not significant.
    async fn list_units(&self) -> InventoryResult<Vec<StorageUnit>>;

    /// Identifiers only, for fan-out placement.
    async fn list_unit_ids(&self) -> InventoryResult<Vec<String>>;

    /// Provision a single unit.
    async fn insert_unit(&self, unit: &StorageUnit) -> InventoryResult<()>;

    /// Provision several units atomically; nothing is written if any fails.
    async fn insert_units(&self, units: &[StorageUnit]) -> InventoryResult<()>;
}
