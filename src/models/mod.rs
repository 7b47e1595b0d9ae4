pub mod bookings;
pub mod categories;
pub mod enquiries;
pub mod treks;

pub use bookings::{Booking, BookingStatus, NewBooking, PaymentStatus};
pub use categories::{Category, CategoryPatch, NewCategory, TrekCategory};
pub use enquiries::{Enquiry, EnquiryStatus, NewEnquiry};
pub use treks::{Difficulty, ItineraryDay, NewTrek, Trek, TrekPatch};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rows carry a server-assigned UUID primary key; the cache layer uses it
/// to locate the entry to replace or prune.
pub trait Identified {
    fn id(&self) -> Uuid;
}

/// Shortened trek embedded in enquiry and booking rows.
///
/// Enquiry reads embed it without dates and booking reads embed it with
/// dates, so the date fields stay optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrekSummary {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}
