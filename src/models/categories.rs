use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Identified;

/// A curated grouping of treks shown on the storefront.
///
/// Inactive categories stay in the database and keep their trek links,
/// but only active ones are offered to visitors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: Option<Uuid>,
}

impl Identified for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Row in the trek/category join table. Carries no id of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrekCategory {
    pub trek_id: Uuid,
    pub category_id: Uuid,
}

// ── DTOs ──

/// Payload for creating a category. The server assigns id and created_at.
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub title: String,
    pub description: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
}

/// Partial patch for an existing category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
