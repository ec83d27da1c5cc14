use crate::shared::EntityId;
use crate::system::auth::{deserialize_roles, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_roles")]
    pub roles: Vec<Role>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub roles: Vec<Role>,
}

impl CreateUserDto {
    pub const MIN_PASSWORD_LEN: usize = 8;

    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("Username is required".to_string());
        }
        if self.password.chars().count() < Self::MIN_PASSWORD_LEN {
            return Err(format!(
                "Password must be at least {} characters",
                Self::MIN_PASSWORD_LEN
            ));
        }
        if self.roles.is_empty() {
            return Err("Assign at least one role".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    pub id: EntityId,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub roles: Vec<Role>,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_validation() {
        let mut dto = CreateUserDto {
            username: "picker1".into(),
            password: "short".into(),
            email: None,
            full_name: None,
            roles: vec![Role::WarehouseManager],
        };
        assert!(dto.validate().is_err());
        dto.password = "long-enough".into();
        assert!(dto.validate().is_ok());
        dto.roles.clear();
        assert_eq!(dto.validate().unwrap_err(), "Assign at least one role");
    }

    #[test]
    fn user_page_row_drops_unknown_roles() {
        let json = r#"{"id": 3, "username": "ops", "roles": ["AUDITOR", "ROLE_WAREHOUSE_MANAGER"]}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.roles, vec![Role::WarehouseManager]);
        assert!(user.active);
    }
}
