pub mod price;
pub mod volume;
