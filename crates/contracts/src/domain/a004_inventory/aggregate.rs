use crate::shared::EntityId;
use serde::{Deserialize, Serialize};

/// Stock level of one product in one warehouse (aggregate a004)
///
/// `reserved` is maintained by the backend's reservation rules; the
/// dashboard only displays it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub id: EntityId,
    pub product_id: EntityId,
    pub product_sku: String,
    pub product_name: String,
    pub warehouse_id: EntityId,
    pub warehouse_name: String,
    pub on_hand: i64,
    #[serde(default)]
    pub reserved: i64,
    /// Sent by newer backends; otherwise derived from on_hand - reserved.
    #[serde(default)]
    pub available: Option<i64>,
    #[serde(default)]
    pub reorder_level: i64,
}

impl Inventory {
    pub fn available(&self) -> i64 {
        self.available.unwrap_or(self.on_hand - self.reserved)
    }

    pub fn is_low_stock(&self) -> bool {
        self.available() <= self.reorder_level
    }
}

/// Filter for the inventory list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_id: Option<EntityId>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub low_stock_only: bool,
}

/// Manual stock correction. `quantity` is signed: positive adds stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustmentRequest {
    pub product_id: EntityId,
    pub warehouse_id: EntityId,
    pub quantity: i64,
    pub reason: String,
}

impl StockAdjustmentRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity == 0 {
            return Err("Quantity must not be zero".to_string());
        }
        if self.reason.trim().is_empty() {
            return Err("A reason is required for manual adjustments".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(on_hand: i64, reserved: i64, available: Option<i64>, reorder_level: i64) -> Inventory {
        Inventory {
            id: 1,
            product_id: 10,
            product_sku: "SKU-10".into(),
            product_name: "Pallet wrap".into(),
            warehouse_id: 2,
            warehouse_name: "North".into(),
            on_hand,
            reserved,
            available,
            reorder_level,
        }
    }

    #[test]
    fn available_prefers_server_value() {
        assert_eq!(row(10, 4, None, 0).available(), 6);
        assert_eq!(row(10, 4, Some(5), 0).available(), 5);
    }

    #[test]
    fn low_stock_includes_reorder_level() {
        assert!(row(10, 5, None, 5).is_low_stock());
        assert!(!row(10, 4, None, 5).is_low_stock());
    }

    #[test]
    fn adjustment_requires_reason_and_quantity() {
        let mut req = StockAdjustmentRequest {
            product_id: 1,
            warehouse_id: 1,
            quantity: -3,
            reason: "damaged".into(),
        };
        assert!(req.validate().is_ok());
        req.quantity = 0;
        assert!(req.validate().is_err());
        req.quantity = 2;
        req.reason = " ".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn filter_omits_unset_fields() {
        let qs = serde_json::to_value(InventoryFilter::default()).unwrap();
        assert_eq!(qs, serde_json::json!({}));
    }
}
