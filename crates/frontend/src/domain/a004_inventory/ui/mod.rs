pub mod adjust;
pub mod list;
pub mod movements;
