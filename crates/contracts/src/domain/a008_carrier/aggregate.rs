use crate::shared::EntityId;
use serde::{Deserialize, Serialize};

const TRACKING_PLACEHOLDER: &str = "{tracking}";

/// Carrier (aggregate a008)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    pub id: EntityId,
    pub name: String,
    pub code: String,
    /// URL with a `{tracking}` placeholder, e.g. `https://track.example/{tracking}`
    #[serde(default)]
    pub tracking_url_template: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Carrier {
    /// Tracking link for a shipment, when the carrier has a template.
    pub fn tracking_url(&self, tracking_number: &str) -> Option<String> {
        let template = self.tracking_url_template.as_deref()?.trim();
        let tracking = tracking_number.trim();
        if template.is_empty() || tracking.is_empty() || !template.contains(TRACKING_PLACEHOLDER) {
            return None;
        }
        Some(template.replace(TRACKING_PLACEHOLDER, tracking))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    pub code: String,
    pub tracking_url_template: Option<String>,
    pub active: bool,
}

impl Default for CarrierDto {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            code: String::new(),
            tracking_url_template: None,
            active: true,
        }
    }
}

impl From<Carrier> for CarrierDto {
    fn from(c: Carrier) -> Self {
        Self {
            id: Some(c.id),
            name: c.name,
            code: c.code,
            tracking_url_template: c.tracking_url_template,
            active: c.active,
        }
    }
}

impl CarrierDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.code.trim().is_empty() {
            return Err("Code is required".to_string());
        }
        if let Some(template) = self.tracking_url_template.as_deref() {
            let template = template.trim();
            if !template.is_empty() && !template.contains(TRACKING_PLACEHOLDER) {
                return Err(format!(
                    "Tracking URL template must contain {}",
                    TRACKING_PLACEHOLDER
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carrier(template: Option<&str>) -> Carrier {
        Carrier {
            id: 1,
            name: "Fast Freight".into(),
            code: "FF".into(),
            tracking_url_template: template.map(str::to_string),
            active: true,
        }
    }

    #[test]
    fn tracking_url_substitutes_number() {
        let c = carrier(Some("https://ff.example/track/{tracking}?src=admin"));
        assert_eq!(
            c.tracking_url(" 1Z999 ").as_deref(),
            Some("https://ff.example/track/1Z999?src=admin")
        );
    }

    #[test]
    fn tracking_url_absent_without_template_or_number() {
        assert_eq!(carrier(None).tracking_url("1Z999"), None);
        assert_eq!(carrier(Some("https://ff.example/")).tracking_url("1Z999"), None);
        assert_eq!(carrier(Some("https://ff.example/{tracking}")).tracking_url(""), None);
    }

    #[test]
    fn template_must_carry_placeholder() {
        let dto = CarrierDto {
            name: "Fast Freight".into(),
            code: "FF".into(),
            tracking_url_template: Some("https://ff.example/".into()),
            active: true,
            id: None,
        };
        assert!(dto.validate().is_err());
    }
}
