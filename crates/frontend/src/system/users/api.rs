use contracts::shared::{EntityId, Page, PageQuery};
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};

use crate::shared::api_utils::with_query;
use crate::shared::http::{api_client, ApiError};

const BASE: &str = "/api/users";

pub async fn fetch_page(query: &PageQuery) -> Result<Page<User>, ApiError> {
    api_client().get_json(&with_query(BASE, &[query])).await
}

pub async fn create_user(dto: &CreateUserDto) -> Result<User, ApiError> {
    api_client().post_json(BASE, dto).await
}

pub async fn update_user(dto: &UpdateUserDto) -> Result<User, ApiError> {
    api_client()
        .put_json(&format!("{}/{}", BASE, dto.id), dto)
        .await
}

pub async fn delete_user(id: EntityId) -> Result<(), ApiError> {
    api_client().delete(&format!("{}/{}", BASE, id)).await
}
