use contracts::system::auth::{Role, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::claims::{decode_claims, session_user};
use super::{api, storage};
use crate::shared::http::{api_client, ApiError};
use crate::shared::toast::use_toast;

/// Seconds before `exp` at which a stored token is already renewed.
const EXPIRY_LEEWAY_SECS: i64 = 30;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// True until the stored session has been checked on startup.
    pub restoring: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user_info.is_some()
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.user_info
            .as_ref()
            .map(|u| u.has_any_role(roles))
            .unwrap_or(false)
    }

    pub fn roles(&self) -> Vec<Role> {
        self.user_info
            .as_ref()
            .map(|u| u.roles.clone())
            .unwrap_or_default()
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState {
        restoring: true,
        ..AuthState::default()
    });
    let toast = use_toast();

    api_client().set_on_session_expired(move || {
        let was_signed_in = auth_state.get_untracked().is_authenticated();
        set_auth_state.set(AuthState::default());
        if was_signed_in {
            toast.error(&ApiError::SessionExpired);
        }
    });

    spawn_local(async move {
        let restored = restore_session().await;
        if let Some(user) = &restored.user_info {
            log::info!("Session restored for {}", user.username);
        }
        set_auth_state.set(restored);
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Pick up tokens left in localStorage by a previous visit.
async fn restore_session() -> AuthState {
    let Some(mut token) = storage::get_access_token() else {
        return AuthState::default();
    };

    let now = chrono::Utc::now().timestamp();
    let expired = decode_claims(&token)
        .map(|claims| claims.is_expired(now, EXPIRY_LEEWAY_SECS))
        .unwrap_or(false);
    if expired {
        log::info!("Stored access token has expired, renewing");
        match api_client().renew_session().await {
            Ok(renewed) => token = renewed,
            Err(e) => {
                log::info!("Stored session could not be renewed: {}", e);
                return AuthState::default();
            }
        }
    }

    match api::get_current_user().await {
        Ok(user) => {
            // The client may have refreshed on the way.
            let token = storage::get_access_token().unwrap_or(token);
            AuthState {
                user_info: session_user(&token, Some(user)),
                access_token: Some(token),
                restoring: false,
            }
        }
        Err(e) if e.is_auth_failure() => AuthState::default(),
        Err(e) => {
            log::warn!("Failed to load current user, using token claims: {}", e);
            AuthState {
                user_info: session_user(&token, None),
                access_token: Some(token),
                restoring: false,
            }
        }
    }
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Sign in and publish the new session.
pub async fn do_login(
    set_auth_state: WriteSignal<AuthState>,
    username: String,
    password: String,
) -> Result<(), ApiError> {
    let response = api::login(username, password).await?;

    let user_info = session_user(&response.access_token, response.user);
    if user_info.as_ref().map_or(true, |u| u.roles.is_empty()) {
        log::warn!("Signed in without any recognized role");
    }

    storage::save_access_token(&response.access_token);
    storage::save_refresh_token(&response.refresh_token);

    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info,
        restoring: false,
    });
    Ok(())
}

/// Revoke the refresh token (best effort) and forget the session.
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Some(refresh_token) = storage::get_refresh_token() {
        api::logout(refresh_token).await;
    }
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: Vec<Role>) -> UserInfo {
        UserInfo {
            id: "1".into(),
            username: "u".into(),
            full_name: None,
            email: None,
            roles,
        }
    }

    #[test]
    fn authenticated_needs_token_and_user() {
        let mut state = AuthState {
            access_token: Some("t".into()),
            ..AuthState::default()
        };
        assert!(!state.is_authenticated());
        state.user_info = Some(user(vec![Role::Client]));
        assert!(state.is_authenticated());
    }

    #[test]
    fn role_checks() {
        let state = AuthState {
            access_token: Some("t".into()),
            user_info: Some(user(vec![Role::WarehouseManager])),
            restoring: false,
        };
        assert!(state.has_any_role(&Role::STAFF));
        assert!(!state.has_any_role(&[Role::Admin]));
        assert!(!AuthState::default().has_any_role(&Role::ALL));
    }
}
