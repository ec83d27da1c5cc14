use crate::system::auth::storage;

/// Where the access/refresh token pair lives between page loads.
pub trait TokenStore {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    /// A `None` refresh token keeps the stored one.
    fn save_tokens(&self, access_token: &str, refresh_token: Option<&str>);
    fn clear(&self);
}

/// Browser local storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokens;

impl TokenStore for LocalStorageTokens {
    fn access_token(&self) -> Option<String> {
        storage::get_access_token()
    }

    fn refresh_token(&self) -> Option<String> {
        storage::get_refresh_token()
    }

    fn save_tokens(&self, access_token: &str, refresh_token: Option<&str>) {
        storage::save_access_token(access_token);
        if let Some(refresh_token) = refresh_token {
            storage::save_refresh_token(refresh_token);
        }
    }

    fn clear(&self) {
        storage::clear_tokens();
    }
}
