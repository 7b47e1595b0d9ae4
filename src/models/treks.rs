use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Identified;

/// Difficulty grade shown on trek cards, stored capitalized ("Easy", ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
    Expert,
}

/// One day of a trek itinerary. The `itinerary` column is a JSON array of
/// these, ordered by day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: i32,
    pub title: String,
    pub description: String,
}

/// Row of the `treks` collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trek {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub difficulty: Difficulty,
    pub duration: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub max_participants: i32,
    pub current_participants: i32,
    pub image_url: String,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub things_to_carry: Vec<String>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    pub created_at: DateTime<Utc>,
}

impl Trek {
    /// Spots still open for booking. Clamped at zero so a row that violates
    /// the participant invariant can never produce a negative count.
    pub fn available_spots(&self) -> i32 {
        (self.max_participants - self.current_participants).max(0)
    }
}

impl Identified for Trek {
    fn id(&self) -> Uuid {
        self.id
    }
}

// ── DTOs ──

/// Insert payload for a new trek. The id and created_at are assigned by the
/// server.
#[derive(Clone, Debug, Serialize)]
pub struct NewTrek {
    pub title: String,
    pub description: String,
    pub location: String,
    pub difficulty: Difficulty,
    pub duration: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub max_participants: i32,
    pub current_participants: i32,
    pub image_url: String,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub things_to_carry: Vec<String>,
    pub itinerary: Vec<ItineraryDay>,
}

/// Partial patch for an existing trek. Unset fields are left untouched by
/// the server.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TrekPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_participants: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub things_to_carry: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Vec<ItineraryDay>>,
}
