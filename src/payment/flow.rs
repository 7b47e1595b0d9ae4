use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::gateway::RemoteCollections;
use crate::models::{Booking, BookingStatus, NewBooking, PaymentStatus, Trek};
use crate::payment::{
    CheckoutEvent, CheckoutOptions, CheckoutPrefill, PaymentError, PaymentGateway,
};
use crate::stores::{BookingStore, StoreError};
use crate::validate::{self, FieldError};

const CURRENCY: &str = "INR";
const MERCHANT_NAME: &str = "TrekZone";

/// Phases of the checkout dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Form,
    Processing,
    Success,
}

/// What the visitor typed into the booking form.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub participants: i32,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("booking form has invalid fields")]
    Validation(Vec<FieldError>),
    #[error("only {available} spot(s) available")]
    SpotsExceeded { available: i32 },
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

/// Result of a checkout that got as far as taking money.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// Payment captured and the booking row written.
    Confirmed(Booking),
    /// Payment captured but the booking row could not be written. The
    /// charge is real either way, so the flow still reports success and
    /// points the user at support.
    PaidButUnrecorded {
        payment_id: String,
        error: StoreError,
    },
}

impl CheckoutOutcome {
    pub fn user_message(&self) -> String {
        match self {
            CheckoutOutcome::Confirmed(_) => "Booking confirmed!".to_string(),
            CheckoutOutcome::PaidButUnrecorded { payment_id, .. } => format!(
                "Payment successful (ref {payment_id}) but we failed to \
                 record your booking. Please contact support."
            ),
        }
    }
}

/// Drives one booking purchase from form to paid.
///
/// The remaining spot count is snapshotted when the dialog opens and is
/// not re-read at submit time. State only moves forward on a captured
/// payment; every failure or dismissal lands back on the form with the
/// typed values intact.
pub struct CheckoutFlow<P, C> {
    payments: Arc<P>,
    bookings: Arc<BookingStore<C>>,
    trek_id: Uuid,
    trek_title: String,
    price: f64,
    remaining: i32,
    state: CheckoutState,
}

impl<P, C> CheckoutFlow<P, C>
where
    P: PaymentGateway,
    C: RemoteCollections,
{
    pub fn new(payments: Arc<P>, bookings: Arc<BookingStore<C>>, trek: &Trek) -> Self {
        Self {
            payments,
            bookings,
            trek_id: trek.id,
            trek_title: trek.title.clone(),
            price: trek.price,
            remaining: trek.available_spots(),
            state: CheckoutState::Form,
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Spots left as of when the dialog opened.
    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    /// Price times head count, in major units.
    pub fn total_amount(&self, participants: i32) -> f64 {
        self.price * f64::from(participants.max(0))
    }

    /// Validate the form, take payment, then record the booking.
    pub async fn submit(
        &mut self,
        request: &BookingRequest,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let problems = validate::validate_booking(request);
        if !problems.is_empty() {
            return Err(CheckoutError::Validation(problems));
        }
        if request.participants > self.remaining {
            return Err(CheckoutError::SpotsExceeded {
                available: self.remaining,
            });
        }

        self.state = CheckoutState::Processing;
        let outcome = self.run_payment(request).await;
        self.state = match outcome {
            Ok(_) => CheckoutState::Success,
            Err(_) => CheckoutState::Form,
        };
        outcome
    }

    async fn run_payment(
        &self,
        request: &BookingRequest,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        self.payments.load_assets().await?;

        let amount = self.total_amount(request.participants);
        let order = self.payments.create_order(amount, CURRENCY).await?;
        info!(
            "opening checkout for trek {} ({} participant(s))",
            self.trek_id, request.participants
        );

        let options = CheckoutOptions {
            order,
            name: MERCHANT_NAME.to_string(),
            description: format!(
                "Booking for {} - {} participant(s)",
                self.trek_title, request.participants
            ),
            prefill: CheckoutPrefill {
                name: request.name.clone(),
                email: request.email.clone(),
                contact: request.phone.clone(),
            },
        };

        match self.payments.open_checkout(options).await? {
            CheckoutEvent::Completed(confirmation) => {
                let booking = NewBooking {
                    trek_id: self.trek_id,
                    user_name: request.name.clone(),
                    user_email: request.email.clone(),
                    user_phone: request.phone.clone(),
                    participants: request.participants,
                    total_amount: amount,
                    payment_status: PaymentStatus::Completed,
                    booking_status: BookingStatus::Confirmed,
                    payment_id: Some(confirmation.payment_id.clone()),
                };
                match self.bookings.record(&booking).await {
                    Ok(saved) => Ok(CheckoutOutcome::Confirmed(saved)),
                    Err(e) => {
                        error!(
                            "payment {} captured but booking write failed: {e}",
                            confirmation.payment_id
                        );
                        Ok(CheckoutOutcome::PaidButUnrecorded {
                            payment_id: confirmation.payment_id,
                            error: e,
                        })
                    }
                }
            }
            CheckoutEvent::Dismissed => Err(PaymentError::Cancelled.into()),
            CheckoutEvent::Failed(reason) => Err(PaymentError::Widget(reason).into()),
        }
    }
}
