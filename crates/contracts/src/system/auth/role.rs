use serde::{Deserialize, Deserializer, Serialize};

/// Dashboard roles, ordered from most to least privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    WarehouseManager,
    Client,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::WarehouseManager, Role::Client];

    /// Staff roles see the back-office views.
    pub const STAFF: [Role; 2] = [Role::Admin, Role::WarehouseManager];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::WarehouseManager => "Warehouse manager",
            Role::Client => "Client",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::WarehouseManager => "WAREHOUSE_MANAGER",
            Role::Client => "CLIENT",
        }
    }

    /// Normalizes a claim value as issued by the identity provider.
    ///
    /// Accepts `ROLE_ADMIN`, `admin`, `Warehouse-Manager`, `warehouse manager`
    /// and the aliases `MANAGER`, `WAREHOUSE`, `CUSTOMER`, `USER`.
    pub fn from_claim(raw: &str) -> Option<Role> {
        let normalized = raw.trim().to_uppercase().replace(['-', ' '], "_");
        let normalized = normalized.strip_prefix("ROLE_").unwrap_or(&normalized);
        match normalized {
            "ADMIN" | "ADMINISTRATOR" => Some(Role::Admin),
            "WAREHOUSE_MANAGER" | "MANAGER" | "WAREHOUSE" => Some(Role::WarehouseManager),
            "CLIENT" | "CUSTOMER" | "USER" => Some(Role::Client),
            _ => None,
        }
    }

    /// Normalizes a list of claims, dropping unknown values and duplicates
    /// while keeping first-seen order.
    pub fn from_claims<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<Role> {
        let mut roles = Vec::new();
        for role in raw.into_iter().filter_map(Role::from_claim) {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        roles
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Role::from_claim(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown role: {}", raw)))
    }
}

/// `deserialize_with` helper for role lists sent by the backend: unknown
/// values are dropped instead of failing the whole payload.
pub fn deserialize_roles<'de, D>(deserializer: D) -> Result<Vec<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(Role::from_claims(raw.iter().map(String::as_str)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_claim_spellings() {
        assert_eq!(Role::from_claim("ROLE_ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_claim(" admin "), Some(Role::Admin));
        assert_eq!(Role::from_claim("Warehouse-Manager"), Some(Role::WarehouseManager));
        assert_eq!(Role::from_claim("role_warehouse manager"), Some(Role::WarehouseManager));
        assert_eq!(Role::from_claim("customer"), Some(Role::Client));
        assert_eq!(Role::from_claim("auditor"), None);
    }

    #[test]
    fn claims_are_deduplicated_in_order() {
        let roles = Role::from_claims(["ROLE_CLIENT", "ADMIN", "client", "ghost"]);
        assert_eq!(roles, vec![Role::Client, Role::Admin]);
    }

    #[test]
    fn normalization_is_idempotent() {
        for role in Role::ALL {
            assert_eq!(Role::from_claim(role.code()), Some(role));
        }
    }

    #[test]
    fn deserializes_prefixed_role() {
        let roles: Vec<Role> = serde_json::from_str(r#"["ROLE_ADMIN", "client"]"#).unwrap();
        assert_eq!(roles, vec![Role::Admin, Role::Client]);
        assert_eq!(serde_json::to_string(&Role::WarehouseManager).unwrap(), "\"WAREHOUSE_MANAGER\"");
    }

    #[test]
    fn role_lists_skip_unknown_values() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "deserialize_roles")]
            roles: Vec<Role>,
        }
        let holder: Holder =
            serde_json::from_str(r#"{"roles": ["ADMIN", "AUDITOR", "admin", "CLIENT"]}"#).unwrap();
        assert_eq!(holder.roles, vec![Role::Admin, Role::Client]);
    }
}
