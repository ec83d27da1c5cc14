//! Tabbed center area.
//!
//! - `registry` maps a tab key to its label, roles and page
//! - `page` wraps one opened page and hides it while inactive
//! - `bar` is the strip of tab headers

pub mod bar;
pub mod page;
pub mod registry;

pub use bar::TabBar;
pub use page::TabPage;
