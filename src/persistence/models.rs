//! Database Models
//!
//! Row shapes for the units and products tables, plus conversions into the
//! domain entities. Rows were validated on the way in, so conversions out are
//! infallible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::domain::entities::product::Product;
use crate::domain::entities::unit::StorageUnit;
use crate::domain::repositories::product_ledger::StockFootprint;

/// Unit record in database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UnitRecord {
    pub id: String,
    pub name: String,
    pub capacity: f64,
    pub created_at: DateTime<Utc>,
}

impl From<UnitRecord> for StorageUnit {
    fn from(record: UnitRecord) -> Self {
        StorageUnit {
            id: record.id,
            name: record.name,
            capacity: record.capacity,
        }
    }
}

/// Product row record in database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub sold_quantity: i64,
    pub weight: f64,
    pub volume: f64,
    pub category: String,
    pub purchase_price: f64,
    pub selling_price: f64,
    pub manufacturer: String,
    pub unit_gain: f64,
    pub unit_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product {
            id: record.id,
            name: record.name,
            quantity: record.quantity,
            sold_quantity: record.sold_quantity,
            weight: record.weight,
            volume: record.volume,
            category: record.category,
            purchase_price: record.purchase_price,
            selling_price: record.selling_price,
            manufacturer: record.manufacturer,
            unit_gain: record.unit_gain,
            unit_id: record.unit_id,
        }
    }
}

/// Quantity/volume projection used by the capacity evaluator.
#[derive(Debug, Clone, FromRow)]
pub struct FootprintRow {
    pub quantity: i64,
    pub volume: f64,
}

impl From<FootprintRow> for StockFootprint {
    fn from(row: FootprintRow) -> Self {
        StockFootprint {
            quantity: row.quantity,
            item_volume: row.volume,
        }
    }
}
