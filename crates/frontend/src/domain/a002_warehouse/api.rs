use contracts::domain::a002_warehouse::aggregate::{Warehouse, WarehouseDto};
use contracts::shared::{EntityId, Page, PageQuery};

use crate::shared::api_utils::with_query;
use crate::shared::components::entity_select::SelectOption;
use crate::shared::http::{api_client, ApiError};

const BASE: &str = "/api/warehouses";

pub async fn fetch_page(query: &PageQuery) -> Result<Page<Warehouse>, ApiError> {
    api_client().get_json(&with_query(BASE, &[query])).await
}

pub async fn fetch_by_id(id: EntityId) -> Result<Warehouse, ApiError> {
    api_client().get_json(&format!("{}/{}", BASE, id)).await
}

/// Active warehouses for drop-downs and filters.
pub async fn fetch_options() -> Result<Vec<Warehouse>, ApiError> {
    let query = PageQuery::new(0, 200).with_sort("code", true);
    let page = fetch_page(&query).await?;
    Ok(page.content.into_iter().filter(|w| w.active).collect())
}

pub async fn save(dto: &WarehouseDto) -> Result<Warehouse, ApiError> {
    match dto.id {
        Some(id) => api_client().put_json(&format!("{}/{}", BASE, id), dto).await,
        None => api_client().post_json(BASE, dto).await,
    }
}

pub async fn delete(id: EntityId) -> Result<(), ApiError> {
    api_client().delete(&format!("{}/{}", BASE, id)).await
}

impl SelectOption for Warehouse {
    fn option_id(&self) -> EntityId {
        self.id
    }

    fn option_label(&self) -> String {
        format!("{} · {}", self.code, self.name)
    }
}
