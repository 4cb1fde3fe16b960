use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{InventoryError, InventoryResult};
use crate::domain::value_objects::volume::Volume;

/// A physical storage location with a fixed volumetric capacity.
///
/// Units are created at provisioning time and never deleted; the capacity is
/// the ceiling the capacity evaluator checks placements against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageUnit {
    pub id: String,
    pub name: String,
    pub capacity: f64,
}

impl StorageUnit {
    /// Validating constructor. A missing id gets a generated one.
    pub fn new(id: Option<String>, name: &str, capacity: f64) -> InventoryResult<Self> {
        if name.trim().is_empty() {
            return Err(InventoryError::InvalidProduct(
                "unit name cannot be empty".to_string(),
            ));
        }

        let capacity = Volume::new(capacity)
            .map_err(|e| InventoryError::InvalidProduct(format!("unit capacity: {}", e)))?;

        Ok(StorageUnit {
            id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: name.to_string(),
            capacity: capacity.value(),
        })
    }
}
