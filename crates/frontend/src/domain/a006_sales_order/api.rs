use contracts::domain::a006_sales_order::aggregate::{
    CreateSalesOrderRequest, OrderStatus, SalesOrder, SalesOrderFilter,
};
use contracts::shared::{EntityId, Page, PageQuery, StatusChangeRequest};

use crate::shared::api_utils::with_query;
use crate::shared::components::entity_select::SelectOption;
use crate::shared::http::{api_client, ApiError, Method};

const BASE: &str = "/api/sales-orders";

pub async fn fetch_page(
    query: &PageQuery,
    filter: &SalesOrderFilter,
) -> Result<Page<SalesOrder>, ApiError> {
    api_client().get_json(&with_query(BASE, &[query, filter])).await
}

/// Orders of the signed-in client.
pub async fn fetch_mine(query: &PageQuery) -> Result<Page<SalesOrder>, ApiError> {
    api_client()
        .get_json(&with_query(&format!("{}/mine", BASE), &[query]))
        .await
}

pub async fn fetch_by_id(id: EntityId) -> Result<SalesOrder, ApiError> {
    api_client().get_json(&format!("{}/{}", BASE, id)).await
}

/// Orders with reserved stock, the only ones a shipment can be created for.
pub async fn fetch_reserved() -> Result<Vec<SalesOrder>, ApiError> {
    let query = PageQuery::new(0, 200).with_sort("createdAt", true);
    let filter = SalesOrderFilter {
        status: Some(OrderStatus::Reserved),
        customer_id: None,
    };
    Ok(fetch_page(&query, &filter).await?.content)
}

/// 409 when stock cannot be reserved.
pub async fn create(request: &CreateSalesOrderRequest) -> Result<SalesOrder, ApiError> {
    api_client().post_json(BASE, request).await
}

pub async fn change_status(id: EntityId, status: OrderStatus) -> Result<SalesOrder, ApiError> {
    api_client()
        .send_json(
            Method::Patch,
            &format!("{}/{}/status", BASE, id),
            &StatusChangeRequest::new(status),
        )
        .await
}

impl SelectOption for SalesOrder {
    fn option_id(&self) -> EntityId {
        self.id
    }

    fn option_label(&self) -> String {
        match &self.customer_name {
            Some(customer) => format!("{} · {}", self.order_number, customer),
            None => self.order_number.clone(),
        }
    }
}
