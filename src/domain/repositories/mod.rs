pub mod product_ledger;
pub mod unit_directory;
