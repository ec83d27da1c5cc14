use crate::shared::{EntityId, StatusFlow};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseOrderStatus {
    Draft,
    Submitted,
    Received,
    Canceled,
}

impl StatusFlow for PurchaseOrderStatus {
    fn all() -> &'static [Self] {
        &[
            PurchaseOrderStatus::Draft,
            PurchaseOrderStatus::Submitted,
            PurchaseOrderStatus::Received,
            PurchaseOrderStatus::Canceled,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Draft => "Draft",
            PurchaseOrderStatus::Submitted => "Submitted",
            PurchaseOrderStatus::Received => "Received",
            PurchaseOrderStatus::Canceled => "Canceled",
        }
    }

    fn action_label(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Draft => "Save draft",
            PurchaseOrderStatus::Submitted => "Submit",
            PurchaseOrderStatus::Received => "Mark received",
            PurchaseOrderStatus::Canceled => "Cancel",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Draft => "DRAFT",
            PurchaseOrderStatus::Submitted => "SUBMITTED",
            PurchaseOrderStatus::Received => "RECEIVED",
            PurchaseOrderStatus::Canceled => "CANCELED",
        }
    }

    fn next_states(&self) -> &'static [Self] {
        match self {
            PurchaseOrderStatus::Draft => &[
                PurchaseOrderStatus::Submitted,
                PurchaseOrderStatus::Canceled,
            ],
            PurchaseOrderStatus::Submitted => &[
                PurchaseOrderStatus::Received,
                PurchaseOrderStatus::Canceled,
            ],
            PurchaseOrderStatus::Received | PurchaseOrderStatus::Canceled => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLine {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub product_id: EntityId,
    #[serde(default)]
    pub product_sku: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    pub quantity: i64,
    pub unit_cost: f64,
    #[serde(default)]
    pub received_quantity: i64,
}

impl PurchaseOrderLine {
    pub fn amount(&self) -> f64 {
        self.quantity as f64 * self.unit_cost
    }
}

/// Purchase order (aggregate a005)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: EntityId,
    pub order_number: String,
    pub supplier_id: EntityId,
    #[serde(default)]
    pub supplier_name: Option<String>,
    pub warehouse_id: EntityId,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    pub status: PurchaseOrderStatus,
    #[serde(default)]
    pub expected_date: Option<NaiveDate>,
    #[serde(default)]
    pub lines: Vec<PurchaseOrderLine>,
    /// Server total; falls back to the sum of lines when absent.
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PurchaseOrder {
    pub fn total(&self) -> f64 {
        self.total
            .unwrap_or_else(|| self.lines.iter().map(PurchaseOrderLine::amount).sum())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLineRequest {
    pub product_id: EntityId,
    pub quantity: i64,
    pub unit_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseOrderRequest {
    pub supplier_id: EntityId,
    pub warehouse_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_date: Option<NaiveDate>,
    pub lines: Vec<PurchaseOrderLineRequest>,
}

impl CreatePurchaseOrderRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.lines.is_empty() {
            return Err("Add at least one line".to_string());
        }
        if let Some(pos) = self.lines.iter().position(|l| l.quantity <= 0) {
            return Err(format!("Line {}: quantity must be positive", pos + 1));
        }
        if let Some(pos) = self
            .lines
            .iter()
            .position(|l| !l.unit_cost.is_finite() || l.unit_cost < 0.0)
        {
            return Err(format!("Line {}: unit cost must not be negative", pos + 1));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PurchaseOrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<EntityId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions() {
        use PurchaseOrderStatus::*;
        assert!(Draft.can_transition_to(Submitted));
        assert!(Submitted.can_transition_to(Received));
        assert!(!Draft.can_transition_to(Received));
        assert!(Received.is_terminal());
        assert!(Canceled.is_terminal());
        assert_eq!(PurchaseOrderStatus::from_code("submitted"), Some(Submitted));
    }

    #[test]
    fn total_falls_back_to_lines() {
        let json = r#"{
            "id": 1,
            "orderNumber": "PO-0001",
            "supplierId": 3,
            "warehouseId": 1,
            "status": "DRAFT",
            "expectedDate": "2024-06-01",
            "lines": [
                {"productId": 1, "quantity": 10, "unitCost": 2.5},
                {"productId": 2, "quantity": 4, "unitCost": 1.0}
            ]
        }"#;
        let po: PurchaseOrder = serde_json::from_str(json).unwrap();
        assert_eq!(po.total(), 29.0);
        assert_eq!(po.expected_date, NaiveDate::from_ymd_opt(2024, 6, 1));
    }

    #[test]
    fn create_request_validation_names_the_line() {
        let req = CreatePurchaseOrderRequest {
            supplier_id: 1,
            warehouse_id: 1,
            expected_date: None,
            lines: vec![
                PurchaseOrderLineRequest { product_id: 1, quantity: 2, unit_cost: 1.0 },
                PurchaseOrderLineRequest { product_id: 2, quantity: 0, unit_cost: 1.0 },
            ],
        };
        assert_eq!(req.validate().unwrap_err(), "Line 2: quantity must be positive");
    }
}
