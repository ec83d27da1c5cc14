use contracts::domain::a003_supplier::aggregate::{Supplier, SupplierDto};
use contracts::shared::{EntityId, Page, PageQuery};

use crate::shared::api_utils::with_query;
use crate::shared::components::entity_select::SelectOption;
use crate::shared::http::{api_client, ApiError};

const BASE: &str = "/api/suppliers";

pub async fn fetch_page(query: &PageQuery) -> Result<Page<Supplier>, ApiError> {
    api_client().get_json(&with_query(BASE, &[query])).await
}

pub async fn fetch_by_id(id: EntityId) -> Result<Supplier, ApiError> {
    api_client().get_json(&format!("{}/{}", BASE, id)).await
}

pub async fn fetch_options() -> Result<Vec<Supplier>, ApiError> {
    let query = PageQuery::new(0, 500).with_sort("name", true);
    Ok(fetch_page(&query).await?.content)
}

pub async fn save(dto: &SupplierDto) -> Result<Supplier, ApiError> {
    match dto.id {
        Some(id) => api_client().put_json(&format!("{}/{}", BASE, id), dto).await,
        None => api_client().post_json(BASE, dto).await,
    }
}

pub async fn delete(id: EntityId) -> Result<(), ApiError> {
    api_client().delete(&format!("{}/{}", BASE, id)).await
}

impl SelectOption for Supplier {
    fn option_id(&self) -> EntityId {
        self.id
    }

    fn option_label(&self) -> String {
        self.name.clone()
    }
}
