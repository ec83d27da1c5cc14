use crate::shared::{EntityId, StatusFlow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    Pending,
    InTransit,
    Delivered,
    Failed,
}

impl StatusFlow for ShipmentStatus {
    fn all() -> &'static [Self] {
        &[
            ShipmentStatus::Pending,
            ShipmentStatus::InTransit,
            ShipmentStatus::Delivered,
            ShipmentStatus::Failed,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "Pending",
            ShipmentStatus::InTransit => "In transit",
            ShipmentStatus::Delivered => "Delivered",
            ShipmentStatus::Failed => "Failed",
        }
    }

    fn action_label(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "Create",
            ShipmentStatus::InTransit => "Dispatch",
            ShipmentStatus::Delivered => "Confirm delivery",
            ShipmentStatus::Failed => "Mark failed",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "PENDING",
            ShipmentStatus::InTransit => "IN_TRANSIT",
            ShipmentStatus::Delivered => "DELIVERED",
            ShipmentStatus::Failed => "FAILED",
        }
    }

    fn next_states(&self) -> &'static [Self] {
        match self {
            ShipmentStatus::Pending => &[ShipmentStatus::InTransit, ShipmentStatus::Failed],
            ShipmentStatus::InTransit => &[ShipmentStatus::Delivered, ShipmentStatus::Failed],
            ShipmentStatus::Delivered | ShipmentStatus::Failed => &[],
        }
    }
}

/// Shipment (aggregate a007)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: EntityId,
    pub sales_order_id: EntityId,
    #[serde(default)]
    pub sales_order_number: Option<String>,
    pub carrier_id: EntityId,
    #[serde(default)]
    pub carrier_name: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    pub status: ShipmentStatus,
    #[serde(default)]
    pub shipped_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentRequest {
    pub sales_order_id: EntityId,
    pub carrier_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ShipmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_id: Option<EntityId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_transit_uses_snake_wire_code() {
        assert_eq!(serde_json::to_string(&ShipmentStatus::InTransit).unwrap(), "\"IN_TRANSIT\"");
        assert_eq!(ShipmentStatus::from_code("in_transit"), Some(ShipmentStatus::InTransit));
    }

    #[test]
    fn lifecycle() {
        assert!(ShipmentStatus::Pending.can_transition_to(ShipmentStatus::InTransit));
        assert!(!ShipmentStatus::Pending.can_transition_to(ShipmentStatus::Delivered));
        assert!(ShipmentStatus::Failed.is_terminal());
    }
}
