//! Product details form.
//!
//! - view_model.rs: form state, validation, load/save commands
//! - view.rs: the component

mod view;
mod view_model;

pub use view::ProductDetails;
