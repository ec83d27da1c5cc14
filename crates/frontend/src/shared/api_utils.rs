//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and query strings.

use serde::Serialize;

use crate::shared::config::app_config;

/// Get the base URL for API requests
///
/// Uses the configured base URL when set, otherwise the current window
/// location with the configured API port.
///
/// # Returns
/// - API base URL like "http://localhost:8080" or "https://api.example.com"
/// - Empty string if window is not available and nothing is configured
pub fn api_base() -> String {
    let config = app_config();
    let window = match web_sys::window() {
        Some(w) => w,
        None => return config.api.resolve_base("http:", "127.0.0.1"),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    config.api.resolve_base(&protocol, &hostname)
}

/// Append one or more serialized query structs to a path.
///
/// Empty parts are skipped, so a default filter adds nothing.
///
/// # Example
/// ```rust,ignore
/// let path = with_query("/api/products", &[&page_query]);
/// ```
pub fn with_query(path: &str, parts: &[&dyn ErasedQuery]) -> String {
    let encoded: Vec<String> = parts
        .iter()
        .filter_map(|p| p.encode())
        .filter(|s| !s.is_empty())
        .collect();
    if encoded.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, encoded.join("&"))
    }
}

/// Object-safe wrapper over `serde_qs` so differently typed filters can be
/// combined in one call.
pub trait ErasedQuery {
    fn encode(&self) -> Option<String>;
}

impl<T: Serialize> ErasedQuery for T {
    fn encode(&self) -> Option<String> {
        match serde_qs::to_string(self) {
            Ok(s) => Some(s),
            Err(e) => {
                log::warn!("Failed to encode query string: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a006_sales_order::aggregate::{OrderStatus, SalesOrderFilter};
    use contracts::shared::PageQuery;

    #[test]
    fn combines_page_and_filter() {
        let page = PageQuery::new(1, 20).with_search("acme");
        let filter = SalesOrderFilter {
            status: Some(OrderStatus::Reserved),
            customer_id: None,
        };
        let path = with_query("/api/sales-orders", &[&page, &filter]);
        assert_eq!(
            path,
            "/api/sales-orders?page=1&size=20&search=acme&status=RESERVED"
        );
    }

    #[test]
    fn empty_filter_adds_nothing() {
        let filter = SalesOrderFilter::default();
        assert_eq!(with_query("/api/sales-orders", &[&filter]), "/api/sales-orders");
    }
}
