use serde_json::json;
use uuid::Uuid;

use crate::gateway::{Collection, Gateway, Order, RemoteCollections};
use crate::models::{Booking, BookingStatus, NewBooking, PaymentStatus};
use crate::stores::{Placement, ResourceStore, StoreError};

/// Bookings, newest first. Bookings are never deleted, only moved
/// through their status columns.
pub struct BookingStore<C> {
    inner: ResourceStore<Booking, C>,
}

impl<C> BookingStore<C>
where
    C: RemoteCollections,
{
    pub fn new(gateway: Gateway<C>) -> Self {
        let inner = ResourceStore::new(
            gateway,
            Collection::Bookings,
            "*,trek:treks(id,title,location,image_url,start_date,end_date)",
            vec![Order::desc("created_at")],
            Placement::First,
        );
        Self { inner }
    }

    pub async fn refresh(&self) -> Result<Vec<Booking>, StoreError> {
        self.inner.refresh().await
    }

    pub async fn cached(&self) -> Vec<Booking> {
        self.inner.cached().await
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    /// Persist a booking once checkout has resolved.
    pub async fn record(&self, booking: &NewBooking) -> Result<Booking, StoreError> {
        self.inner.create(booking).await
    }

    pub async fn set_booking_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, StoreError> {
        self.inner.update(id, &json!({ "booking_status": status })).await
    }

    /// Update the payment side, optionally attaching the processor's
    /// payment id when one became known.
    pub async fn set_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
        payment_id: Option<&str>,
    ) -> Result<Booking, StoreError> {
        let mut patch = json!({ "payment_status": status });
        if let Some(payment_id) = payment_id {
            patch["payment_id"] = json!(payment_id);
        }
        self.inner.update(id, &patch).await
    }
}
