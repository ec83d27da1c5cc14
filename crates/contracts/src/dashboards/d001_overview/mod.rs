use serde::{Deserialize, Serialize};

/// Counters shown on the overview dashboard.
///
/// The backend scopes the numbers to the caller: clients only see their own
/// orders, staff see everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSummary {
    pub product_count: u64,
    pub low_stock_count: u64,
    pub open_sales_orders: u64,
    pub pending_shipments: u64,
    pub open_purchase_orders: u64,
    pub reserved_units: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_counters_default_to_zero() {
        let summary: DashboardSummary =
            serde_json::from_str(r#"{"productCount": 12, "openSalesOrders": 3}"#).unwrap();
        assert_eq!(summary.product_count, 12);
        assert_eq!(summary.open_sales_orders, 3);
        assert_eq!(summary.pending_shipments, 0);
    }
}
