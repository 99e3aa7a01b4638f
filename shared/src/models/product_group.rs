//! Product Group Model

use serde::{Deserialize, Serialize};

/// Product group entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductGroup {
    pub id: i64,
    pub name: String,
    /// Owning category (required)
    pub category_id: i64,
}

/// Create product group payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductGroupCreate {
    pub name: String,
    pub category_id: i64,
}

/// Update product group payload
///
/// The product-group resource exposes no update route; the type exists so
/// the payload shape stays documented next to the others.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductGroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}
