//! Depot Inventory Core
//!
//! Multi-unit inventory allocation and transaction ledger: storage units with
//! fixed volumetric capacity, product rows scoped to one unit each, capacity-
//! gated placement, and atomic buy/sell stock mutations.

pub mod config;
pub mod domain;
pub mod persistence;
pub mod seed;
