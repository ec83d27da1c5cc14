use crate::shared::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Receipt,
    Shipment,
    Adjustment,
    Reservation,
    Release,
    Transfer,
}

impl MovementType {
    pub const ALL: [MovementType; 6] = [
        MovementType::Receipt,
        MovementType::Shipment,
        MovementType::Adjustment,
        MovementType::Reservation,
        MovementType::Release,
        MovementType::Transfer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MovementType::Receipt => "Receipt",
            MovementType::Shipment => "Shipment",
            MovementType::Adjustment => "Adjustment",
            MovementType::Reservation => "Reservation",
            MovementType::Release => "Release",
            MovementType::Transfer => "Transfer",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            MovementType::Receipt => "RECEIPT",
            MovementType::Shipment => "SHIPMENT",
            MovementType::Adjustment => "ADJUSTMENT",
            MovementType::Reservation => "RESERVATION",
            MovementType::Release => "RELEASE",
            MovementType::Transfer => "TRANSFER",
        }
    }
}

/// Stock ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryMovement {
    pub id: EntityId,
    pub product_id: EntityId,
    #[serde(default)]
    pub product_sku: Option<String>,
    pub warehouse_id: EntityId,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    pub movement_type: MovementType,
    /// Signed: negative values leave the warehouse.
    pub quantity: i64,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement_type: Option<MovementType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_movement() {
        let json = r#"{
            "id": 5,
            "productId": 10,
            "warehouseId": 2,
            "movementType": "RESERVATION",
            "quantity": -4,
            "reference": "SO-1001",
            "createdAt": "2024-05-01T10:00:00Z"
        }"#;
        let m: InventoryMovement = serde_json::from_str(json).unwrap();
        assert_eq!(m.movement_type, MovementType::Reservation);
        assert_eq!(m.quantity, -4);
        assert_eq!(m.reference.as_deref(), Some("SO-1001"));
    }
}
