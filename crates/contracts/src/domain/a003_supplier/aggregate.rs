use crate::shared::EntityId;
use serde::{Deserialize, Serialize};

/// Supplier (aggregate a003)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<Supplier> for SupplierDto {
    fn from(s: Supplier) -> Self {
        Self {
            id: Some(s.id),
            name: s.name,
            contact_email: s.contact_email,
            phone: s.phone,
            address: s.address,
        }
    }
}

impl SupplierDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if let Some(email) = self.contact_email.as_deref() {
            let email = email.trim();
            if !email.is_empty() && !looks_like_email(email) {
                return Err("Contact email is not valid".to_string());
            }
        }
        Ok(())
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_optional_but_checked_when_present() {
        let mut dto = SupplierDto {
            name: "Acme Fasteners".into(),
            ..SupplierDto::default()
        };
        assert!(dto.validate().is_ok());

        dto.contact_email = Some("sales@acme.example".into());
        assert!(dto.validate().is_ok());

        dto.contact_email = Some("sales@acme".into());
        assert!(dto.validate().is_err());

        dto.contact_email = Some("   ".into());
        assert!(dto.validate().is_ok());
    }
}
