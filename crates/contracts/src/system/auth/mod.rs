mod role;

pub use role::{deserialize_roles, Role};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// The backend may rotate the refresh token; when it does not, the stored
/// one stays valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_roles")]
    pub roles: Vec<Role>,
}

impl UserInfo {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.has_role(*r))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Highest-privilege role, used for the header badge.
    pub fn primary_role(&self) -> Option<Role> {
        Role::ALL.into_iter().find(|r| self.has_role(*r))
    }

    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_without_user() {
        let r: LoginResponse =
            serde_json::from_str(r#"{"accessToken": "a", "refreshToken": "r"}"#).unwrap();
        assert!(r.user.is_none());
        assert_eq!(r.refresh_token, "r");
    }

    #[test]
    fn login_survives_unknown_role() {
        let json = r#"{"accessToken": "a", "refreshToken": "r",
            "user": {"id": "7", "username": "ann", "roles": ["ADMIN", "AUDITOR"]}}"#;
        let r: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(r.user.unwrap().roles, vec![Role::Admin]);
    }

    #[test]
    fn primary_role_is_highest_privilege() {
        let u = UserInfo {
            id: "1".into(),
            username: "wm".into(),
            full_name: Some(" ".into()),
            email: None,
            roles: vec![Role::Client, Role::WarehouseManager],
        };
        assert_eq!(u.primary_role(), Some(Role::WarehouseManager));
        assert_eq!(u.display_name(), "wm");
        assert!(!u.is_admin());
    }
}
