pub mod actor;
pub mod product;
pub mod unit;
