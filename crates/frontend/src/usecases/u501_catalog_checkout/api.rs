use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a006_sales_order::aggregate::{CreateSalesOrderRequest, SalesOrder};
use contracts::shared::{Page, PageQuery};

use super::cart::Cart;
use crate::domain::a001_product::api as product_api;
use crate::domain::a006_sales_order::api as sales_order_api;
use crate::shared::http::ApiError;

/// Active products only; archived ones cannot be ordered.
pub async fn fetch_catalog(query: &PageQuery) -> Result<Page<Product>, ApiError> {
    let mut page = product_api::fetch_page(query).await?;
    page.content.retain(|p| p.active);
    Ok(page)
}

/// Places the cart as one sales order. Stock is reserved by the backend;
/// 409 means some line could not be reserved.
pub async fn checkout(cart: &Cart) -> Result<SalesOrder, ApiError> {
    let request = CreateSalesOrderRequest::new(cart.to_order_lines());
    request.validate().map_err(ApiError::Validation)?;
    sales_order_api::create(&request).await
}
