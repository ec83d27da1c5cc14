use contracts::domain::a007_shipment::aggregate::{
    CreateShipmentRequest, Shipment, ShipmentFilter, ShipmentStatus,
};
use contracts::shared::{EntityId, Page, PageQuery, StatusChangeRequest};

use crate::shared::api_utils::with_query;
use crate::shared::http::{api_client, ApiError, Method};

const BASE: &str = "/api/shipments";

pub async fn fetch_page(
    query: &PageQuery,
    filter: &ShipmentFilter,
) -> Result<Page<Shipment>, ApiError> {
    api_client().get_json(&with_query(BASE, &[query, filter])).await
}

/// 409 when the sales order is no longer reserved.
pub async fn create(request: &CreateShipmentRequest) -> Result<Shipment, ApiError> {
    api_client().post_json(BASE, request).await
}

pub async fn change_status(id: EntityId, status: ShipmentStatus) -> Result<Shipment, ApiError> {
    api_client()
        .send_json(
            Method::Patch,
            &format!("{}/{}/status", BASE, id),
            &StatusChangeRequest::new(status),
        )
        .await
}
