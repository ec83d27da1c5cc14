pub mod api_utils;
pub mod components;
pub mod config;
pub mod confirm;
pub mod date_utils;
pub mod format;
pub mod http;
pub mod icons;
pub mod list_utils;
pub mod modal_frame;
pub mod modal_stack;
pub mod page_frame;
pub mod ticker;
pub mod toast;
