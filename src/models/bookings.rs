use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Identified, TrekSummary};

/// Settlement state of the money side of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

/// Operational state of the booking itself. New bookings start out
/// confirmed because they are only written after a captured payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

/// A paid (or attempted) reservation of spots on a trek.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub trek_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub participants: i32,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    pub booking_status: BookingStatus,
    #[serde(default)]
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub trek: Option<TrekSummary>,
}

impl Identified for Booking {
    fn id(&self) -> Uuid {
        self.id
    }
}

// ── DTOs ──

/// Payload for recording a booking after checkout resolves.
///
/// Unlike enquiries, both statuses are written explicitly so a booking
/// recorded straight after a captured payment lands as confirmed.
#[derive(Debug, Clone, Serialize)]
pub struct NewBooking {
    pub trek_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub participants: i32,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    pub booking_status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
}
