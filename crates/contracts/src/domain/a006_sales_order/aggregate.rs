use crate::shared::{EntityId, StatusFlow};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Reserved,
    Shipped,
    Delivered,
    Canceled,
}

impl StatusFlow for OrderStatus {
    fn all() -> &'static [Self] {
        &[
            OrderStatus::Created,
            OrderStatus::Reserved,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Canceled,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            OrderStatus::Created => "Created",
            OrderStatus::Reserved => "Reserved",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Canceled => "Canceled",
        }
    }

    fn action_label(&self) -> &'static str {
        match self {
            OrderStatus::Created => "Create",
            OrderStatus::Reserved => "Reserve stock",
            OrderStatus::Shipped => "Mark shipped",
            OrderStatus::Delivered => "Mark delivered",
            OrderStatus::Canceled => "Cancel",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Reserved => "RESERVED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Canceled => "CANCELED",
        }
    }

    fn next_states(&self) -> &'static [Self] {
        match self {
            OrderStatus::Created => &[OrderStatus::Reserved, OrderStatus::Canceled],
            OrderStatus::Reserved => &[OrderStatus::Shipped, OrderStatus::Canceled],
            OrderStatus::Shipped => &[OrderStatus::Delivered],
            OrderStatus::Delivered | OrderStatus::Canceled => &[],
        }
    }
}

impl OrderStatus {
    /// Clients may cancel their own orders until stock leaves the warehouse.
    pub fn client_can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Created | OrderStatus::Reserved)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderLine {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub product_id: EntityId,
    #[serde(default)]
    pub product_sku: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
}

impl SalesOrderLine {
    pub fn amount(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Sales order (aggregate a006)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    pub id: EntityId,
    pub order_number: String,
    pub customer_id: EntityId,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub warehouse_id: Option<EntityId>,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub lines: Vec<SalesOrderLine>,
    #[serde(default)]
    pub total: Option<f64>,
    /// Set by the backend while stock is reserved; expiry is enforced there.
    #[serde(default)]
    pub reservation_expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SalesOrder {
    pub fn total(&self) -> f64 {
        self.total
            .unwrap_or_else(|| self.lines.iter().map(SalesOrderLine::amount).sum())
    }

    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Time left on the reservation, for display only.
    pub fn reservation_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        if self.status != OrderStatus::Reserved {
            return None;
        }
        let expires = self.reservation_expires_at?;
        Some((expires - now).max(Duration::zero()))
    }
}

/// Renders a remaining duration as `1h 05m` / `4m 09s` / `expired`.
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.num_seconds();
    if secs <= 0 {
        return "expired".to_string();
    }
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else {
        format!("{}m {:02}s", minutes, seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderLineRequest {
    pub product_id: EntityId,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalesOrderRequest {
    /// Staff may order on behalf of a customer; clients leave it empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_id: Option<EntityId>,
    pub lines: Vec<SalesOrderLineRequest>,
    /// Idempotency key so a double-submitted checkout creates one order.
    pub client_reference: Uuid,
}

impl CreateSalesOrderRequest {
    pub fn new(lines: Vec<SalesOrderLineRequest>) -> Self {
        Self {
            customer_id: None,
            warehouse_id: None,
            lines,
            client_reference: Uuid::new_v4(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.lines.is_empty() {
            return Err("The order has no lines".to_string());
        }
        if self.lines.iter().any(|l| l.quantity <= 0) {
            return Err("Quantities must be positive".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<EntityId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order(status: OrderStatus, expires: Option<DateTime<Utc>>) -> SalesOrder {
        SalesOrder {
            id: 1,
            order_number: "SO-1".into(),
            customer_id: 9,
            customer_name: None,
            warehouse_id: None,
            warehouse_name: None,
            status,
            lines: vec![
                SalesOrderLine {
                    id: None,
                    product_id: 1,
                    product_sku: None,
                    product_name: None,
                    quantity: 3,
                    unit_price: 2.0,
                },
                SalesOrderLine {
                    id: None,
                    product_id: 2,
                    product_sku: None,
                    product_name: None,
                    quantity: 1,
                    unit_price: 10.0,
                },
            ],
            total: None,
            reservation_expires_at: expires,
            created_at: None,
        }
    }

    #[test]
    fn lifecycle() {
        use OrderStatus::*;
        assert_eq!(Created.next_states(), &[Reserved, Canceled]);
        assert_eq!(Reserved.next_states(), &[Shipped, Canceled]);
        assert_eq!(Shipped.next_states(), &[Delivered]);
        assert!(Delivered.is_terminal());
        assert!(!Shipped.can_transition_to(Canceled));
        assert!(Reserved.client_can_cancel());
        assert!(!Shipped.client_can_cancel());
    }

    #[test]
    fn wire_codes_round_trip_through_serde() {
        let json = serde_json::to_string(&OrderStatus::Reserved).unwrap();
        assert_eq!(json, "\"RESERVED\"");
        assert_eq!(OrderStatus::from_code(OrderStatus::Reserved.code()), Some(OrderStatus::Reserved));
    }

    #[test]
    fn totals() {
        let o = order(OrderStatus::Created, None);
        assert_eq!(o.total(), 16.0);
        assert_eq!(o.item_count(), 4);
    }

    #[test]
    fn reservation_countdown_only_while_reserved() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let expires = now + Duration::minutes(14) + Duration::seconds(5);

        let reserved = order(OrderStatus::Reserved, Some(expires));
        let remaining = reserved.reservation_remaining(now).unwrap();
        assert_eq!(format_remaining(remaining), "14m 05s");

        let late = reserved.reservation_remaining(expires + Duration::minutes(1)).unwrap();
        assert_eq!(format_remaining(late), "expired");

        assert!(order(OrderStatus::Created, Some(expires)).reservation_remaining(now).is_none());
    }

    #[test]
    fn remaining_with_hours() {
        assert_eq!(format_remaining(Duration::minutes(125)), "2h 05m");
    }

    #[test]
    fn create_request_has_fresh_reference() {
        let a = CreateSalesOrderRequest::new(vec![SalesOrderLineRequest { product_id: 1, quantity: 1 }]);
        let b = CreateSalesOrderRequest::new(vec![SalesOrderLineRequest { product_id: 1, quantity: 1 }]);
        assert_ne!(a.client_reference, b.client_reference);
        assert!(a.validate().is_ok());
        assert!(CreateSalesOrderRequest::new(vec![]).validate().is_err());
    }
}
