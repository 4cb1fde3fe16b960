pub mod allocation;
pub mod capacity;
pub mod transaction;
