use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Descriptive data for a class code in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,
}

impl ClassInfo {
    #[must_use]
    pub fn new(name: &str, category: &str, warehouse: &str) -> Self {
        Self {
            name: name.to_string(),
            category: Some(category.to_string()),
            warehouse: Some(warehouse.to_string()),
        }
    }
}
