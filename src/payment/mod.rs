use thiserror::Error;
use tokio::sync::oneshot;

pub mod flow;
pub mod razorpay;

pub use flow::{BookingRequest, CheckoutError, CheckoutFlow, CheckoutOutcome, CheckoutState};
pub use razorpay::RazorpayGateway;

/// An order minted before checkout opens. Amounts are in minor units
/// (paise for INR).
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOrder {
    pub order_id: String,
    pub amount_minor: i64,
    pub currency: String,
}

/// Contact details the widget pre-fills into its own form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutPrefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// Everything the checkout widget needs to render one purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOptions {
    pub order: PaymentOrder,
    pub name: String,
    pub description: String,
    pub prefill: CheckoutPrefill,
}

/// Proof of payment handed back by the widget on success.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentConfirmation {
    pub payment_id: String,
    pub order_id: Option<String>,
    pub signature: Option<String>,
}

/// How one checkout attempt ended at the widget.
#[derive(Debug)]
pub enum CheckoutEvent {
    Completed(PaymentConfirmation),
    Dismissed,
    Failed(String),
}

/// A checkout handed to the rendering surface. Whoever drains the
/// surface channel drives the widget and reports back through `done`.
pub struct CheckoutRequest {
    pub key_id: String,
    pub options: CheckoutOptions,
    pub done: oneshot::Sender<CheckoutEvent>,
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment gateway is not configured")]
    NotConfigured,
    #[error("failed to load checkout script: {0}")]
    ScriptLoad(String),
    #[error("failed to create payment order: {0}")]
    OrderCreation(String),
    #[error("payment cancelled by user")]
    Cancelled,
    #[error("payment failed: {0}")]
    Widget(String),
}

/// Driver for an external payment processor.
#[allow(async_fn_in_trait)]
pub trait PaymentGateway {
    /// Make sure the processor's assets are ready. Later calls while
    /// already loaded are free no-ops.
    async fn load_assets(&self) -> Result<(), PaymentError>;

    /// Mint an order for `amount` in major units of `currency`.
    async fn create_order(&self, amount: f64, currency: &str)
        -> Result<PaymentOrder, PaymentError>;

    /// Hand the order to the widget and wait for the user to complete,
    /// dismiss, or fail it. Waits as long as the widget does.
    async fn open_checkout(&self, options: CheckoutOptions)
        -> Result<CheckoutEvent, PaymentError>;
}
