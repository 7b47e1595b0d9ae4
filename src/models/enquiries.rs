use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Identified, TrekSummary};

/// Lifecycle of a visitor enquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryStatus {
    Pending,
    Responded,
    Closed,
}

/// A question a visitor left about a trek.
///
/// The embedded `trek` summary is populated by the read query and is
/// `None` when the trek has since been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enquiry {
    pub id: Uuid,
    pub trek_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: EnquiryStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub trek: Option<TrekSummary>,
}

impl Identified for Enquiry {
    fn id(&self) -> Uuid {
        self.id
    }
}

// ── DTOs ──

/// Payload for submitting an enquiry. Status is left to the server
/// default (`pending`).
#[derive(Debug, Clone, Serialize)]
pub struct NewEnquiry {
    pub trek_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}
