use contracts::domain::a004_inventory::aggregate::{Inventory, InventoryFilter, StockAdjustmentRequest};
use contracts::domain::a004_inventory::movement::{InventoryMovement, MovementFilter};
use contracts::shared::{Page, PageQuery};

use crate::shared::api_utils::with_query;
use crate::shared::http::{api_client, ApiError, Method};

const BASE: &str = "/api/inventory";

pub async fn fetch_page(query: &PageQuery, filter: &InventoryFilter) -> Result<Page<Inventory>, ApiError> {
    api_client().get_json(&with_query(BASE, &[query, filter])).await
}

/// The backend answers 409 when the adjustment would drive stock below
/// what is reserved.
pub async fn adjust(request: &StockAdjustmentRequest) -> Result<(), ApiError> {
    api_client()
        .send_unit(Method::Post, &format!("{}/adjust", BASE), request)
        .await
}

pub async fn fetch_movements(
    query: &PageQuery,
    filter: &MovementFilter,
) -> Result<Page<InventoryMovement>, ApiError> {
    api_client()
        .get_json(&with_query(&format!("{}/movements", BASE), &[query, filter]))
        .await
}
