use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use depot::config::AppConfig;
use depot::domain::repositories::product_ledger::ProductLedger;
use depot::domain::repositories::unit_directory::UnitDirectory;
use depot::persistence::product_repository::SqliteProductLedger;
use depot::persistence::unit_repository::SqliteUnitDirectory;
use depot::persistence::init_database;
use depot::seed::seed_demo_data;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "depot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    info!("Depot inventory core starting");

    let pool = init_database(&config.database.url).await?;
    let units: Arc<dyn UnitDirectory> = Arc::new(SqliteUnitDirectory::new(pool.clone()));
    let ledger: Arc<dyn ProductLedger> = Arc::new(SqliteProductLedger::new(pool));

    if config.seed_demo_data {
        seed_demo_data(units.clone(), ledger.clone()).await?;
    }

    // Startup report: occupancy per unit
    for unit in units.list_units().await? {
        let used: f64 = ledger
            .stock_footprint(&unit.id)
            .await?
            .iter()
            .map(|f| f.quantity as f64 * f.item_volume)
            .sum();
        info!(
            "Unit {} ({}): {:.1} of {:.1} volume in use",
            unit.id, unit.name, used, unit.capacity
        );
    }

    info!("Depot inventory core ready");
    Ok(())
}
