use contracts::system::auth::{LoginRequest, LoginResponse, RefreshRequest, UserInfo};

use crate::shared::http::{api_client, ApiError, Method};

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { username, password };
    api_client().post_json("/api/auth/login", &request).await
}

/// Logout (revoke refresh token). Failures are logged, never surfaced.
pub async fn logout(refresh_token: String) {
    let request = RefreshRequest { refresh_token };
    if let Err(e) = api_client()
        .send_unit(Method::Post, "/api/auth/logout", &request)
        .await
    {
        log::warn!("Logout request failed: {}", e);
    }
}

/// Get current user info
pub async fn get_current_user() -> Result<UserInfo, ApiError> {
    api_client().get_json("/api/auth/me").await
}
