//! CapacityEvaluator - decides whether a placement fits a unit's free volume
//!
//! Usage is recomputed from the current product rows on every call instead of
//! maintaining a cached running total. Correctness over throughput; the
//! expected scale is tens of units and hundreds of products.

use std::sync::Arc;

use crate::domain::errors::{InventoryError, InventoryResult};
use crate::domain::repositories::product_ledger::ProductLedger;
use crate::domain::repositories::unit_directory::UnitDirectory;

/// Outcome of a capacity evaluation, with the figures that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityCheck {
    pub fits: bool,
    pub free_volume: f64,
    pub required_volume: f64,
}

#[derive(Clone)]
pub struct CapacityEvaluator {
    units: Arc<dyn UnitDirectory>,
    ledger: Arc<dyn ProductLedger>,
}

impl CapacityEvaluator {
    pub fn new(units: Arc<dyn UnitDirectory>, ledger: Arc<dyn ProductLedger>) -> Self {
        Self { units, ledger }
    }

    /// Evaluate whether `quantity` items of `item_volume` each fit into the
    /// unit's remaining capacity.
    ///
    /// Free volume below zero means the stored data already overshoots the
    /// unit; that is reported as "does not fit", never a fault.
    pub async fn evaluate(
        &self,
        unit_id: &str,
        quantity: i64,
        item_volume: f64,
    ) -> InventoryResult<CapacityCheck> {
        let unit = self
            .units
            .get_unit(unit_id)
            .await?
            .ok_or_else(|| InventoryError::UnitNotFound(unit_id.to_string()))?;

        let footprints = self.ledger.stock_footprint(unit_id).await?;
        let used_volume: f64 = footprints
            .iter()
            .map(|f| f.quantity as f64 * f.item_volume)
            .sum();

        let free_volume = unit.capacity - used_volume;
        let required_volume = quantity as f64 * item_volume;

        let check = CapacityCheck {
            fits: free_volume >= required_volume,
            free_volume,
            required_volume,
        };

        tracing::debug!(
            "Capacity check for unit {}: used={}, free={}, required={}, fits={}",
            unit_id,
            used_volume,
            check.free_volume,
            check.required_volume,
            check.fits
        );

        Ok(check)
    }

    pub async fn fits(
        &self,
        unit_id: &str,
        quantity: i64,
        item_volume: f64,
    ) -> InventoryResult<bool> {
        Ok(self.evaluate(unit_id, quantity, item_volume).await?.fits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::product::{Product, ProductDraft};
    use crate::domain::entities::unit::StorageUnit;
    use crate::persistence::product_repository::SqliteProductLedger;
    use crate::persistence::unit_repository::SqliteUnitDirectory;
    use crate::persistence::init_database;

    async fn setup() -> (CapacityEvaluator, Arc<dyn ProductLedger>) {
        let pool = init_database("sqlite::memory:").await.unwrap();
        let units: Arc<dyn UnitDirectory> = Arc::new(SqliteUnitDirectory::new(pool.clone()));
        let ledger: Arc<dyn ProductLedger> = Arc::new(SqliteProductLedger::new(pool));

        let unit = StorageUnit::new(Some("u1".to_string()), "unit_1", 100.0).unwrap();
        units.insert_unit(&unit).await.unwrap();

        (CapacityEvaluator::new(units, ledger.clone()), ledger)
    }

    fn draft(id: &str, quantity: i64, volume: f64) -> ProductDraft {
        ProductDraft {
            id: Some(id.to_string()),
            name: format!("product {}", id),
            quantity,
            sold_quantity: 0,
            weight: 1.0,
            volume,
            category: "tools".to_string(),
            purchase_price: 10.0,
            selling_price: 15.0,
            manufacturer: "acme".to_string(),
            unit_gain: 0.0,
        }
    }

    #[tokio::test]
    async fn test_empty_unit_fits_up_to_capacity() {
        let (evaluator, _ledger) = setup().await;

        assert!(evaluator.fits("u1", 10, 10.0).await.unwrap());
        assert!(!evaluator.fits("u1", 10, 10.1).await.unwrap());
    }

    #[tokio::test]
    async fn test_used_volume_reduces_free_space() {
        let (evaluator, ledger) = setup().await;

        let product = Product::from_draft(draft("p1", 10, 5.0), "u1").unwrap();
        ledger.insert(&product).await.unwrap();

        // 50 of 100 used
        let check = evaluator.evaluate("u1", 12, 5.0).await.unwrap();
        assert!(!check.fits);
        assert_eq!(check.free_volume, 50.0);
        assert_eq!(check.required_volume, 60.0);

        assert!(evaluator.fits("u1", 10, 5.0).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_unit_errors() {
        let (evaluator, _ledger) = setup().await;

        let result = evaluator.fits("nope", 1, 1.0).await;
        assert_eq!(
            result.unwrap_err(),
            InventoryError::UnitNotFound("nope".to_string())
        );
    }
}
