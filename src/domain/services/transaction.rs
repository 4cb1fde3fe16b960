//! TransactionService - buy and sell against a single product row
//!
//! Buying increases stock and books the cost as a negative gain delta until
//! items resell; selling shrinks stock and books the margin. Both delegate
//! the actual mutation to the ledger's atomic conditional updates.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::actor::ActorContext;
use crate::domain::entities::product::Product;
use crate::domain::errors::{InventoryError, InventoryResult};
use crate::domain::repositories::product_ledger::ProductLedger;
use crate::domain::services::capacity::CapacityEvaluator;

pub struct TransactionService {
    ledger: Arc<dyn ProductLedger>,
    capacity: CapacityEvaluator,
}

impl TransactionService {
    pub fn new(ledger: Arc<dyn ProductLedger>, capacity: CapacityEvaluator) -> Self {
        Self { ledger, capacity }
    }

    /// Purchase `quantity` items of a product into its unit.
    ///
    /// Gated by the capacity evaluator; the cost lowers the row's gain.
    pub async fn buy(
        &self,
        actor: &ActorContext,
        product_id: &str,
        quantity: i64,
    ) -> InventoryResult<Product> {
        actor.require(actor.role.can_transact(), "buy stock")?;
        if quantity <= 0 {
            return Err(InventoryError::InvalidQuantity(format!(
                "purchase quantity must be positive, got {}",
                quantity
            )));
        }

        let product = self
            .ledger
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| InventoryError::ProductNotFound(product_id.to_string()))?;
        actor.require(actor.can_touch_unit(&product.unit_id), "buy stock")?;

        let check = self
            .capacity
            .evaluate(&product.unit_id, quantity, product.volume)
            .await?;
        if !check.fits {
            warn!(
                "Rejected buy of {}x product {}: unit {} has {} free, needs {}",
                quantity, product_id, product.unit_id, check.free_volume, check.required_volume
            );
            return Err(InventoryError::CapacityExceeded {
                unit_id: product.unit_id.clone(),
                required: check.required_volume,
                free: check.free_volume,
            });
        }

        let cost = product.purchase_price * quantity as f64;
        let updated = self
            .ledger
            .increment_stock(product_id, quantity, -cost)
            .await?;

        info!(
            "Bought {}x product {} for {}: quantity {} -> {}, gain {}",
            quantity, product_id, cost, product.quantity, updated.quantity, updated.unit_gain
        );
        Ok(updated)
    }

    /// Sell `quantity` items of a product.
    ///
    /// The quantity guard runs inside the ledger's conditional update, so a
    /// concurrent sell can never drive stock negative. No capacity check;
    /// stock only shrinks.
    pub async fn sell(
        &self,
        actor: &ActorContext,
        product_id: &str,
        quantity: i64,
    ) -> InventoryResult<Product> {
        actor.require(actor.role.can_transact(), "sell stock")?;
        if quantity <= 0 {
            return Err(InventoryError::InvalidQuantity(format!(
                "sell quantity must be positive, got {}",
                quantity
            )));
        }

        let product = self
            .ledger
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| InventoryError::ProductNotFound(product_id.to_string()))?;
        actor.require(actor.can_touch_unit(&product.unit_id), "sell stock")?;

        let profit = (product.selling_price - product.purchase_price) * quantity as f64;
        let updated = self
            .ledger
            .decrement_stock_guarded(product_id, quantity, profit)
            .await?;

        info!(
            "Sold {}x product {} for {} profit: quantity {} -> {}",
            quantity, product_id, profit, product.quantity, updated.quantity
        );
        Ok(updated)
    }
}
