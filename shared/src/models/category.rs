//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Parent category (`category_parent_id` on the wire), `None` for top level
    #[serde(rename = "category_parent_id", default)]
    pub parent_id: Option<i64>,
    /// Container categories group other categories and hold no product groups
    #[serde(default)]
    pub is_container: bool,
}

impl Category {
    /// Parent reference with self-references dropped.
    pub fn effective_parent_id(&self) -> Option<i64> {
        self.parent_id.filter(|&parent| parent != self.id)
    }
}

/// Create category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "category_parent_id", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_container: Option<bool>,
}

impl CategoryCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn container(mut self) -> Self {
        self.is_container = Some(true);
        self
    }
}

/// Update category payload
///
/// Only `Some` fields are sent. The nested options on `description` and
/// `parent_id` distinguish "leave unchanged" (`None`) from "clear"
/// (`Some(None)`), so a category can be moved back to the top level.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(rename = "category_parent_id", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_container: Option<bool>,
}
