use crate::shared::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog product (aggregate a001)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: EntityId,
    /// Stock-keeping unit, unique per catalog
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub unit_price: f64,
    /// Unit of measure, e.g. "pcs", "kg"
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_unit() -> String {
    "pcs".to_string()
}

fn default_true() -> bool {
    true
}

/// Create/update payload. `id == None` means create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub unit_price: f64,
    pub unit: String,
    pub active: bool,
}

impl Default for ProductDto {
    fn default() -> Self {
        Self {
            id: None,
            sku: String::new(),
            name: String::new(),
            description: None,
            unit_price: 0.0,
            unit: default_unit(),
            active: true,
        }
    }
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: Some(p.id),
            sku: p.sku,
            name: p.name,
            description: p.description,
            unit_price: p.unit_price,
            unit: p.unit,
            active: p.active,
        }
    }
}

impl ProductDto {
    /// Returns the first problem found, if any.
    pub fn validate(&self) -> Result<(), String> {
        if self.sku.trim().is_empty() {
            return Err("SKU is required".to_string());
        }
        if self.sku.chars().any(char::is_whitespace) {
            return Err("SKU must not contain spaces".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err("Unit price must be zero or positive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_defaults_when_fields_missing() {
        let p: Product =
            serde_json::from_str(r#"{"id": 7, "sku": "BOLT-M8", "name": "Bolt M8", "unitPrice": 0.25}"#)
                .unwrap();
        assert_eq!(p.unit, "pcs");
        assert!(p.active);
        assert_eq!(p.description, None);
    }

    #[test]
    fn dto_validation() {
        let mut dto = ProductDto {
            sku: "BOLT-M8".into(),
            name: "Bolt".into(),
            unit_price: 1.5,
            ..ProductDto::default()
        };
        assert!(dto.validate().is_ok());

        dto.sku = "BOLT M8".into();
        assert!(dto.validate().is_err());

        dto.sku = "BOLT-M8".into();
        dto.unit_price = -1.0;
        assert_eq!(
            dto.validate().unwrap_err(),
            "Unit price must be zero or positive"
        );
    }

    #[test]
    fn create_payload_omits_id() {
        let json = serde_json::to_value(ProductDto::default()).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("unitPrice").is_some());
    }
}
