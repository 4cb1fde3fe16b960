//! Demo data seeding.
//!
//! Provisions the three demo storage units and a small starter catalog when
//! the store is empty. Safe to run on every start; an already-provisioned
//! store is left untouched.

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::actor::ActorContext;
use crate::domain::entities::product::ProductDraft;
use crate::domain::entities::unit::StorageUnit;
use crate::domain::errors::InventoryResult;
use crate::domain::repositories::product_ledger::ProductLedger;
use crate::domain::repositories::unit_directory::UnitDirectory;
use crate::domain::services::allocation::AllocationService;

pub async fn seed_demo_data(
    units: Arc<dyn UnitDirectory>,
    ledger: Arc<dyn ProductLedger>,
) -> InventoryResult<()> {
    if !units.list_unit_ids().await?.is_empty() {
        info!("Store already provisioned, skipping demo seed");
        return Ok(());
    }

    let demo_units: Vec<StorageUnit> = [("u1", "unit_1"), ("u2", "unit_2"), ("u3", "unit_3")]
        .iter()
        .map(|(id, name)| StorageUnit::new(Some(id.to_string()), name, 100.0))
        .collect::<InventoryResult<_>>()?;
    units.insert_units(&demo_units).await?;
    info!("Seeded {} demo units", demo_units.len());

    let allocation = AllocationService::new(units, ledger);
    let admin = ActorContext::admin();

    let catalog = [
        ("cordless drill", "tools", "acme", 1.4, 5.0, 100.0, 150.0),
        ("wood screws", "fasteners", "boltco", 0.2, 0.5, 2.0, 4.5),
        ("work gloves", "apparel", "gripfit", 0.3, 1.0, 5.0, 9.0),
    ];

    for (name, category, manufacturer, weight, volume, purchase, selling) in catalog {
        let draft = ProductDraft {
            id: None,
            name: name.to_string(),
            quantity: 0,
            sold_quantity: 0,
            weight,
            volume,
            category: category.to_string(),
            purchase_price: purchase,
            selling_price: selling,
            manufacturer: manufacturer.to_string(),
            unit_gain: 0.0,
        };
        allocation.place_in_all_units(&admin, draft).await?;
    }
    info!("Seeded starter catalog across demo units");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::init_database;
    use crate::persistence::product_repository::SqliteProductLedger;
    use crate::persistence::unit_repository::SqliteUnitDirectory;

    #[tokio::test]
    async fn test_seed_provisions_units_and_catalog() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        let units: Arc<dyn UnitDirectory> = Arc::new(SqliteUnitDirectory::new(pool.clone()));
        let ledger: Arc<dyn ProductLedger> = Arc::new(SqliteProductLedger::new(pool));

        seed_demo_data(units.clone(), ledger.clone()).await.unwrap();

        assert_eq!(units.list_unit_ids().await.unwrap().len(), 3);
        // 3 catalog entries fanned out over 3 units
        assert_eq!(ledger.list_all().await.unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        let units: Arc<dyn UnitDirectory> = Arc::new(SqliteUnitDirectory::new(pool.clone()));
        let ledger: Arc<dyn ProductLedger> = Arc::new(SqliteProductLedger::new(pool));

        seed_demo_data(units.clone(), ledger.clone()).await.unwrap();
        seed_demo_data(units.clone(), ledger.clone()).await.unwrap();

        assert_eq!(units.list_unit_ids().await.unwrap().len(), 3);
        assert_eq!(ledger.list_all().await.unwrap().len(), 9);
    }
}
