//! Inventory error taxonomy.
//!
//! Every failure path in the core returns one of these variants; nothing is
//! swallowed or silently retried. Persistence transport failures are folded
//! into `PersistenceUnavailable` so callers can apply their own retry policy.

use thiserror::Error;

/// Result type used across the inventory core.
pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InventoryError {
    #[error("Unit not found: {0}")]
    UnitNotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Product does not fit in unit {unit_id}: requires {required} volume, {free} free")]
    CapacityExceeded {
        unit_id: String,
        required: f64,
        free: f64,
    },

    #[error("Insufficient stock for product {product_id}: tried to sell {requested}")]
    InsufficientStock { product_id: String, requested: i64 },

    #[error("Duplicate identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("Invalid search range: {0}")]
    InvalidRange(String),

    #[error("Operation not permitted for {role}: {action}")]
    NotPermitted { role: String, action: String },

    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),
}

/// Field-level validation failures raised by value objects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("value must be non-negative")]
    MustBeNonNegative,

    #[error("value must be finite")]
    MustBeFinite,

    #[error("value cannot be empty")]
    MustBeNonEmpty,
}
