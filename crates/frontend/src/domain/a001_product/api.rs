use contracts::domain::a001_product::aggregate::{Product, ProductDto};
use contracts::shared::{EntityId, Page, PageQuery};

use crate::shared::api_utils::with_query;
use crate::shared::components::entity_select::SelectOption;
use crate::shared::http::{api_client, ApiError};

const BASE: &str = "/api/products";

/// How many rows a reference drop-down loads.
const OPTIONS_LIMIT: u32 = 500;

pub async fn fetch_page(query: &PageQuery) -> Result<Page<Product>, ApiError> {
    api_client().get_json(&with_query(BASE, &[query])).await
}

pub async fn fetch_by_id(id: EntityId) -> Result<Product, ApiError> {
    api_client().get_json(&format!("{}/{}", BASE, id)).await
}

/// Products for drop-downs, by name.
pub async fn fetch_options() -> Result<Vec<Product>, ApiError> {
    let query = PageQuery::new(0, OPTIONS_LIMIT).with_sort("name", true);
    Ok(fetch_page(&query).await?.content)
}

/// Create when `dto.id` is empty, update otherwise.
pub async fn save(dto: &ProductDto) -> Result<Product, ApiError> {
    match dto.id {
        Some(id) => api_client().put_json(&format!("{}/{}", BASE, id), dto).await,
        None => api_client().post_json(BASE, dto).await,
    }
}

pub async fn delete(id: EntityId) -> Result<(), ApiError> {
    api_client().delete(&format!("{}/{}", BASE, id)).await
}

impl SelectOption for Product {
    fn option_id(&self) -> EntityId {
        self.id
    }

    fn option_label(&self) -> String {
        format!("{} · {}", self.sku, self.name)
    }
}
