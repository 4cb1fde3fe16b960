//! Product Ledger Trait
//!
//! Owns product rows and exposes the atomic stock mutations plus the
//! filter/sort/paginate query surface. Implementations must apply both stock
//! deltas of a mutation as one conditional write keyed by product id;
//! read-then-write outside a transaction is not an acceptable implementation
//! of `increment_stock` or `decrement_stock_guarded`.

use async_trait::async_trait;

use crate::domain::entities::product::Product;
use crate::domain::errors::{InventoryError, InventoryResult};

/// Projection of a product row's storage usage, for capacity math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockFootprint {
    pub quantity: i64,
    pub item_volume: f64,
}

/// Fields the query surface may order by. Anything else requested by the
/// caller falls through to natural order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Name,
    Quantity,
}

impl OrderField {
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "name" => Some(OrderField::Name),
            "quantity" => Some(OrderField::Quantity),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            OrderField::Name => "name",
            OrderField::Quantity => "quantity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Ascending unless the caller asked for exactly `"descending"`.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("descending") => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// Parameters of a ledger search. All fields optional and combinable; name
/// and product id filters are ANDed when both present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub order_field: Option<String>,
    pub order_direction: Option<String>,
    pub name: Option<String>,
    pub product_id: Option<String>,
    pub unit_id: Option<String>,
    pub start_index: Option<i64>,
    pub end_index: Option<i64>,
}

impl SearchQuery {
    /// Resolve the raw start/end indexes into an `(offset, limit)` window.
    ///
    /// The window applies only when both bounds are supplied. Bounds are
    /// checked here so malformed input is rejected before any database
    /// interaction.
    pub fn window(&self) -> InventoryResult<Option<(i64, i64)>> {
        match (self.start_index, self.end_index) {
            (Some(start), Some(end)) => {
                if start < 0 || end < 0 {
                    return Err(InventoryError::InvalidRange(
                        "indexes must be non-negative".to_string(),
                    ));
                }
                if start > end {
                    return Err(InventoryError::InvalidRange(format!(
                        "start index {} is past end index {}",
                        start, end
                    )));
                }
                Ok(Some((start, end - start)))
            }
            _ => Ok(None),
        }
    }

    /// Resolved ordering, or `None` when no recognized field was requested.
    pub fn ordering(&self) -> Option<(OrderField, SortDirection)> {
        let field = OrderField::from_raw(self.order_field.as_deref()?)?;
        Some((field, SortDirection::from_raw(self.order_direction.as_deref())))
    }

    /// Pin the query to the actor's visibility: global for admins, the
    /// actor's own unit otherwise.
    pub fn scoped_to(mut self, actor: &crate::domain::entities::actor::ActorContext) -> Self {
        if let Some(unit_id) = actor.search_scope() {
            self.unit_id = Some(unit_id.to_string());
        }
        self
    }
}

#[async_trait]
pub trait ProductLedger: Send + Sync {
    /// Point lookup by product id.
    async fn get_by_id(&self, id: &str) -> InventoryResult<Option<Product>>;

    /// Every product row in the ledger.
    async fn list_all(&self) -> InventoryResult<Vec<Product>>;

    /// Product rows assigned to one unit.
    async fn list_by_unit(&self, unit_id: &str) -> InventoryResult<Vec<Product>>;

    /// Quantity/volume pairs for all rows in a unit.
    async fn stock_footprint(&self, unit_id: &str) -> InventoryResult<Vec<StockFootprint>>;

    /// Insert one row; fails with `DuplicateIdentifier` on id collision.
    async fn insert(&self, product: &Product) -> InventoryResult<Product>;

    /// Insert several rows atomically; returns the stored ids in input order.
    async fn insert_batch(&self, products: &[Product]) -> InventoryResult<Vec<String>>;

    /// Apply a quantity delta and a gain delta as one atomic write.
    async fn increment_stock(
        &self,
        id: &str,
        quantity_delta: i64,
        gain_delta: f64,
    ) -> InventoryResult<Product>;

    /// Like `increment_stock` but conditioned on `quantity >= sell_quantity`
    /// at write time; also bumps the cumulative sold quantity.
    async fn decrement_stock_guarded(
        &self,
        id: &str,
        sell_quantity: i64,
        gain_delta: f64,
    ) -> InventoryResult<Product>;

    /// Filtered, ordered, windowed query. An empty result is not an error.
    async fn search(&self, query: &SearchQuery) -> InventoryResult<Vec<Product>>;
}
