use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{InventoryError, InventoryResult};
use crate::domain::value_objects::{price::Price, volume::Volume};

/// Raw product attributes as received at the boundary, before validation.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub id: Option<String>,
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
}

/// One (product, unit) row of the ledger.
///
/// The "same" product replicated across units is stored as independent rows
/// sharing descriptive attributes, each with its own id, quantity and gain.
/// Rows are only built through [`Product::from_draft`] or
/// [`Product::seed_for_unit`]; downstream code never re-validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
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
}

impl Product {
    /// Validating constructor for a placement into one specific unit.
    pub fn from_draft(draft: ProductDraft, unit_id: &str) -> InventoryResult<Self> {
        if draft.name.trim().is_empty() {
            return Err(InventoryError::InvalidProduct(
                "name cannot be empty".to_string(),
            ));
        }
        if draft.quantity < 0 {
            return Err(InventoryError::InvalidProduct(
                "quantity must be non-negative".to_string(),
            ));
        }
        if draft.sold_quantity < 0 {
            return Err(InventoryError::InvalidProduct(
                "sold quantity must be non-negative".to_string(),
            ));
        }
        if !draft.unit_gain.is_finite() {
            return Err(InventoryError::InvalidProduct(
                "unit gain must be finite".to_string(),
            ));
        }

        let volume = Volume::new(draft.volume)
            .map_err(|e| InventoryError::InvalidProduct(format!("volume: {}", e)))?;
        let weight = Volume::new(draft.weight)
            .map_err(|e| InventoryError::InvalidProduct(format!("weight: {}", e)))?;
        let purchase_price = Price::new(draft.purchase_price)
            .map_err(|e| InventoryError::InvalidProduct(format!("purchase price: {}", e)))?;
        let selling_price = Price::new(draft.selling_price)
            .map_err(|e| InventoryError::InvalidProduct(format!("selling price: {}", e)))?;

        Ok(Product {
            id: draft.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: draft.name,
            quantity: draft.quantity,
            sold_quantity: draft.sold_quantity,
            weight: weight.value(),
            volume: volume.value(),
            category: draft.category,
            purchase_price: purchase_price.value(),
            selling_price: selling_price.value(),
            manufacturer: draft.manufacturer,
            unit_gain: draft.unit_gain,
            unit_id: unit_id.to_string(),
        })
    }

    /// Zero-stock seed row for a fan-out placement.
    ///
    /// Quantity, sold quantity and gain are forced to zero regardless of the
    /// caller's draft, and every row gets a fresh id so it stays independently
    /// addressable.
    pub fn seed_for_unit(draft: &ProductDraft, unit_id: &str) -> InventoryResult<Self> {
        let seeded = ProductDraft {
            id: Some(Uuid::new_v4().to_string()),
            quantity: 0,
            sold_quantity: 0,
            unit_gain: 0.0,
            ..draft.clone()
        };
        Self::from_draft(seeded, unit_id)
    }

    /// Volume this row currently occupies in its unit.
    pub fn footprint(&self) -> f64 {
        self.quantity as f64 * self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            id: Some("p1".to_string()),
            name: "cordless drill".to_string(),
            quantity: 10,
            sold_quantity: 2,
            weight: 1.4,
            volume: 5.0,
            category: "tools".to_string(),
            purchase_price: 100.0,
            selling_price: 150.0,
            manufacturer: "acme".to_string(),
            unit_gain: -1000.0,
        }
    }

    #[test]
    fn test_from_draft_valid() {
        let product = Product::from_draft(draft(), "u1").unwrap();
        assert_eq!(product.id, "p1");
        assert_eq!(product.unit_id, "u1");
        assert_eq!(product.quantity, 10);
        assert_eq!(product.footprint(), 50.0);
    }

    #[test]
    fn test_from_draft_generates_id() {
        let mut d = draft();
        d.id = None;
        let product = Product::from_draft(d, "u1").unwrap();
        assert!(!product.id.is_empty());
    }

    #[test]
    fn test_from_draft_empty_name() {
        let mut d = draft();
        d.name = "".to_string();
        let result = Product::from_draft(d, "u1");
        assert!(matches!(result, Err(InventoryError::InvalidProduct(_))));
    }

    #[test]
    fn test_from_draft_negative_quantity() {
        let mut d = draft();
        d.quantity = -1;
        let result = Product::from_draft(d, "u1");
        assert!(matches!(result, Err(InventoryError::InvalidProduct(_))));
    }

    #[test]
    fn test_from_draft_negative_volume() {
        let mut d = draft();
        d.volume = -5.0;
        let result = Product::from_draft(d, "u1");
        assert!(matches!(result, Err(InventoryError::InvalidProduct(_))));
    }

    #[test]
    fn test_from_draft_nan_price() {
        let mut d = draft();
        d.selling_price = f64::NAN;
        let result = Product::from_draft(d, "u1");
        assert!(matches!(result, Err(InventoryError::InvalidProduct(_))));
    }

    #[test]
    fn test_seed_for_unit_forces_zero_stock() {
        let seeded = Product::seed_for_unit(&draft(), "u2").unwrap();
        assert_eq!(seeded.quantity, 0);
        assert_eq!(seeded.sold_quantity, 0);
        assert_eq!(seeded.unit_gain, 0.0);
        assert_eq!(seeded.unit_id, "u2");
        // the caller's id is ignored so each fan-out row stays addressable
        assert_ne!(seeded.id, "p1");
    }

    #[test]
    fn test_product_json_round_trip() {
        let product = Product::from_draft(draft(), "u1").unwrap();
        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_seed_rows_get_distinct_ids() {
        let a = Product::seed_for_unit(&draft(), "u1").unwrap();
        let b = Product::seed_for_unit(&draft(), "u2").unwrap();
        assert_ne!(a.id, b.id);
    }
}
