pub mod page;
pub mod status;

pub use page::{Page, PageQuery};
pub use status::{StatusChangeRequest, StatusFlow};

/// Identifier type used by every backend entity.
pub type EntityId = i64;
