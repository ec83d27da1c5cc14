use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "logistics_access_token";
const REFRESH_TOKEN_KEY: &str = "logistics_refresh_token";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn write(key: &str, value: &str) {
    match get_local_storage() {
        Some(storage) => {
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage rejected write of '{}'", key);
            }
        }
        None => log::warn!("localStorage is not available"),
    }
}

/// Save access token to localStorage
pub fn save_access_token(token: &str) {
    write(ACCESS_TOKEN_KEY, token);
}

/// Get access token from localStorage
pub fn get_access_token() -> Option<String> {
    get_local_storage()?.get_item(ACCESS_TOKEN_KEY).ok()?
}

/// Save refresh token to localStorage
pub fn save_refresh_token(token: &str) {
    write(REFRESH_TOKEN_KEY, token);
}

/// Get refresh token from localStorage
pub fn get_refresh_token() -> Option<String> {
    get_local_storage()?.get_item(REFRESH_TOKEN_KEY).ok()?
}

/// Clear all authentication tokens
pub fn clear_tokens() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
    }
}
