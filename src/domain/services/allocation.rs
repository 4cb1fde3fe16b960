//! AllocationService - places new product rows into storage units
//!
//! Placement into one unit is gated by the capacity evaluator; fan-out
//! placement seeds a zero-stock row per unit and is always admissible.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::actor::ActorContext;
use crate::domain::entities::product::{Product, ProductDraft};
use crate::domain::errors::{InventoryError, InventoryResult};
use crate::domain::repositories::product_ledger::ProductLedger;
use crate::domain::repositories::unit_directory::UnitDirectory;
use crate::domain::services::capacity::CapacityEvaluator;

pub struct AllocationService {
    units: Arc<dyn UnitDirectory>,
    ledger: Arc<dyn ProductLedger>,
    capacity: CapacityEvaluator,
}

impl AllocationService {
    pub fn new(units: Arc<dyn UnitDirectory>, ledger: Arc<dyn ProductLedger>) -> Self {
        let capacity = CapacityEvaluator::new(units.clone(), ledger.clone());
        Self {
            units,
            ledger,
            capacity,
        }
    }

    /// Place a new product row into one specific unit.
    ///
    /// The draft is validated once here; the capacity gate runs before any
    /// insert is attempted.
    pub async fn place_in_unit(
        &self,
        actor: &ActorContext,
        draft: ProductDraft,
        unit_id: &str,
    ) -> InventoryResult<Product> {
        actor.require(actor.role.can_manage_catalog(), "place product")?;

        let product = Product::from_draft(draft, unit_id)?;

        let check = self
            .capacity
            .evaluate(unit_id, product.quantity, product.volume)
            .await?;
        if !check.fits {
            warn!(
                "Rejected placement of product {} into unit {}: requires {}, free {}",
                product.id, unit_id, check.required_volume, check.free_volume
            );
            return Err(InventoryError::CapacityExceeded {
                unit_id: unit_id.to_string(),
                required: check.required_volume,
                free: check.free_volume,
            });
        }

        let stored = self.ledger.insert(&product).await?;
        info!(
            "Placed product {} ({}x vol {}) into unit {}",
            stored.id, stored.quantity, stored.volume, unit_id
        );
        Ok(stored)
    }

    /// Replicate a product into every unit as independent zero-stock rows.
    ///
    /// All rows are built and validated before anything is written; the batch
    /// insert is all-or-nothing.
    pub async fn place_in_all_units(
        &self,
        actor: &ActorContext,
        draft: ProductDraft,
    ) -> InventoryResult<Vec<Product>> {
        actor.require(actor.role.can_manage_catalog(), "place product in all units")?;

        let unit_ids = self.units.list_unit_ids().await?;

        let mut rows = Vec::with_capacity(unit_ids.len());
        for unit_id in &unit_ids {
            rows.push(Product::seed_for_unit(&draft, unit_id)?);
        }

        self.ledger.insert_batch(&rows).await?;
        info!(
            "Fanned out product '{}' as {} zero-stock rows",
            draft.name,
            rows.len()
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::unit::StorageUnit;
    use crate::persistence::init_database;
    use crate::persistence::product_repository::SqliteProductLedger;
    use crate::persistence::unit_repository::SqliteUnitDirectory;

    async fn setup(unit_count: usize) -> (AllocationService, Arc<dyn ProductLedger>) {
        let pool = init_database("sqlite::memory:").await.unwrap();
        let units: Arc<dyn UnitDirectory> = Arc::new(SqliteUnitDirectory::new(pool.clone()));
        let ledger: Arc<dyn ProductLedger> = Arc::new(SqliteProductLedger::new(pool));

        for i in 1..=unit_count {
            let unit =
                StorageUnit::new(Some(format!("u{}", i)), &format!("unit_{}", i), 100.0).unwrap();
            units.insert_unit(&unit).await.unwrap();
        }

        (AllocationService::new(units, ledger.clone()), ledger)
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
    async fn test_place_in_unit_within_capacity() {
        let (service, _ledger) = setup(1).await;
        let admin = ActorContext::admin();

        let product = service
            .place_in_unit(&admin, draft("p1", 10, 5.0), "u1")
            .await
            .unwrap();
        assert_eq!(product.unit_id, "u1");
        assert_eq!(product.quantity, 10);
    }

    #[tokio::test]
    async fn test_place_in_unit_over_capacity() {
        let (service, _ledger) = setup(1).await;
        let admin = ActorContext::admin();

        service
            .place_in_unit(&admin, draft("p1", 10, 5.0), "u1")
            .await
            .unwrap();

        // 50 free, second placement needs 60
        let result = service
            .place_in_unit(&admin, draft("p2", 12, 5.0), "u1")
            .await;
        assert!(matches!(
            result,
            Err(InventoryError::CapacityExceeded { .. })
        ));
    }

    #[tokio::test]
    async fn test_place_in_unit_unknown_unit() {
        let (service, _ledger) = setup(1).await;
        let admin = ActorContext::admin();

        let result = service
            .place_in_unit(&admin, draft("p1", 1, 1.0), "missing")
            .await;
        assert_eq!(
            result.unwrap_err(),
            InventoryError::UnitNotFound("missing".to_string())
        );
    }

    #[tokio::test]
    async fn test_place_in_unit_invalid_draft_skips_capacity_check() {
        let (service, ledger) = setup(1).await;
        let admin = ActorContext::admin();

        let mut bad = draft("p1", 10, 5.0);
        bad.volume = -1.0;
        let result = service.place_in_unit(&admin, bad, "u1").await;
        assert!(matches!(result, Err(InventoryError::InvalidProduct(_))));
        assert!(ledger.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_place_requires_admin() {
        let (service, _ledger) = setup(1).await;
        let employee = ActorContext::employee("u1");

        let result = service
            .place_in_unit(&employee, draft("p1", 1, 1.0), "u1")
            .await;
        assert!(matches!(result, Err(InventoryError::NotPermitted { .. })));
    }

    #[tokio::test]
    async fn test_place_in_all_units_seeds_every_unit() {
        let (service, ledger) = setup(3).await;
        let admin = ActorContext::admin();

        let rows = service
            .place_in_all_units(&admin, draft("p1", 42, 5.0))
            .await
            .unwrap();

        assert_eq!(rows.len(), 3);
        let mut unit_ids: Vec<String> = rows.iter().map(|p| p.unit_id.clone()).collect();
        unit_ids.sort();
        assert_eq!(unit_ids, vec!["u1", "u2", "u3"]);

        for row in &rows {
            assert_eq!(row.quantity, 0);
            assert_eq!(row.sold_quantity, 0);
            assert_eq!(row.unit_gain, 0.0);
        }

        assert_eq!(ledger.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_place_in_all_units_invalid_draft_writes_nothing() {
        let (service, ledger) = setup(3).await;
        let admin = ActorContext::admin();

        let mut bad = draft("p1", 0, 5.0);
        bad.name = "".to_string();
        let result = service.place_in_all_units(&admin, bad).await;
        assert!(matches!(result, Err(InventoryError::InvalidProduct(_))));
        assert!(ledger.list_all().await.unwrap().is_empty());
    }
}
