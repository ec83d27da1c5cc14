use contracts::domain::a008_carrier::aggregate::{Carrier, CarrierDto};
use contracts::shared::{EntityId, Page, PageQuery};

use crate::shared::api_utils::with_query;
use crate::shared::components::entity_select::SelectOption;
use crate::shared::http::{api_client, ApiError};

const BASE: &str = "/api/carriers";

pub async fn fetch_page(query: &PageQuery) -> Result<Page<Carrier>, ApiError> {
    api_client().get_json(&with_query(BASE, &[query])).await
}

/// Every carrier, active or not. Shipments still reference retired ones.
pub async fn fetch_all() -> Result<Vec<Carrier>, ApiError> {
    let query = PageQuery::new(0, 200).with_sort("name", true);
    Ok(fetch_page(&query).await?.content)
}

pub async fn save(dto: &CarrierDto) -> Result<Carrier, ApiError> {
    match dto.id {
        Some(id) => api_client().put_json(&format!("{}/{}", BASE, id), dto).await,
        None => api_client().post_json(BASE, dto).await,
    }
}

pub async fn delete(id: EntityId) -> Result<(), ApiError> {
    api_client().delete(&format!("{}/{}", BASE, id)).await
}

impl SelectOption for Carrier {
    fn option_id(&self) -> EntityId {
        self.id
    }

    fn option_label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}
