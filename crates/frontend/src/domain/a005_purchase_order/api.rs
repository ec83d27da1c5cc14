use contracts::domain::a005_purchase_order::aggregate::{
    CreatePurchaseOrderRequest, PurchaseOrder, PurchaseOrderFilter, PurchaseOrderStatus,
};
use contracts::shared::{EntityId, Page, PageQuery, StatusChangeRequest};

use crate::shared::api_utils::with_query;
use crate::shared::http::{api_client, ApiError, Method};

const BASE: &str = "/api/purchase-orders";

pub async fn fetch_page(
    query: &PageQuery,
    filter: &PurchaseOrderFilter,
) -> Result<Page<PurchaseOrder>, ApiError> {
    api_client().get_json(&with_query(BASE, &[query, filter])).await
}

pub async fn fetch_by_id(id: EntityId) -> Result<PurchaseOrder, ApiError> {
    api_client().get_json(&format!("{}/{}", BASE, id)).await
}

pub async fn create(request: &CreatePurchaseOrderRequest) -> Result<PurchaseOrder, ApiError> {
    api_client().post_json(BASE, request).await
}

/// Receiving a purchase order is what books stock into the warehouse.
pub async fn change_status(
    id: EntityId,
    status: PurchaseOrderStatus,
) -> Result<PurchaseOrder, ApiError> {
    api_client()
        .send_json(
            Method::Patch,
            &format!("{}/{}/status", BASE, id),
            &StatusChangeRequest::new(status),
        )
        .await
}
