//! Variation Model

use serde::{Deserialize, Serialize};

/// Variation entity (e.g. "Size", "Color")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// Create variation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariationCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

/// Update variation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariationUpdate {
    pub name: String,
}
