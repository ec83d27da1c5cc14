use crate::shared::EntityId;
use serde::{Deserialize, Serialize};

/// Warehouse (aggregate a002)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: EntityId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub code: String,
    pub name: String,
    pub address: Option<String>,
    pub active: bool,
}

impl Default for WarehouseDto {
    fn default() -> Self {
        Self {
            id: None,
            code: String::new(),
            name: String::new(),
            address: None,
            active: true,
        }
    }
}

impl From<Warehouse> for WarehouseDto {
    fn from(w: Warehouse) -> Self {
        Self {
            id: Some(w.id),
            code: w.code,
            name: w.name,
            address: w.address,
            active: w.active,
        }
    }
}

impl WarehouseDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("Code is required".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        Ok(())
    }
}
