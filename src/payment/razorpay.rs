use std::future::Future;

use tokio::sync::{OnceCell, mpsc, oneshot};
use tracing::debug;
use uuid::Uuid;

use super::{
    CheckoutEvent, CheckoutOptions, CheckoutRequest, PaymentError, PaymentGateway, PaymentOrder,
};

pub const CHECKOUT_SCRIPT_URL: &str = "https://checkout.razorpay.com/v1/checkout.js";

/// One-shot loader for the checkout script.
pub struct ScriptLoader {
    loaded: OnceCell<()>,
}

impl ScriptLoader {
    pub fn new() -> Self {
        Self {
            loaded: OnceCell::new(),
        }
    }

    /// Run `load` at most once. Concurrent callers wait on the first
    /// attempt; a failed attempt leaves the cell empty so the next call
    /// tries again.
    pub async fn ensure<F, Fut>(&self, load: F) -> Result<(), PaymentError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), PaymentError>>,
    {
        self.loaded.get_or_try_init(load).await.map(|_| ())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }
}

/// Razorpay checkout driver.
///
/// The gateway itself cannot draw a widget, so it forwards each checkout
/// over a channel to the rendering surface and waits on the reply. The
/// receiver half is handed out once at construction.
pub struct RazorpayGateway {
    client: reqwest::Client,
    key_id: Option<String>,
    script: ScriptLoader,
    surface: mpsc::UnboundedSender<CheckoutRequest>,
}

impl RazorpayGateway {
    pub fn new(key_id: Option<String>) -> (Self, mpsc::UnboundedReceiver<CheckoutRequest>) {
        let (surface, checkouts) = mpsc::unbounded_channel();
        let gateway = Self {
            client: reqwest::Client::new(),
            key_id,
            script: ScriptLoader::new(),
            surface,
        };
        (gateway, checkouts)
    }

    pub fn is_configured(&self) -> bool {
        self.key_id.is_some()
    }

    async fn fetch_script(&self) -> Result<(), PaymentError> {
        debug!("loading checkout script from {CHECKOUT_SCRIPT_URL}");

        let response = self
            .client
            .get(CHECKOUT_SCRIPT_URL)
            .send()
            .await
            .map_err(|e| PaymentError::ScriptLoad(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PaymentError::ScriptLoad(format!("HTTP {status}")));
        }
        Ok(())
    }
}

impl PaymentGateway for RazorpayGateway {
    async fn load_assets(&self) -> Result<(), PaymentError> {
        if self.key_id.is_none() {
            return Err(PaymentError::NotConfigured);
        }
        self.script.ensure(|| self.fetch_script()).await
    }

    async fn create_order(
        &self,
        amount: f64,
        currency: &str,
    ) -> Result<PaymentOrder, PaymentError> {
        if self.key_id.is_none() {
            return Err(PaymentError::NotConfigured);
        }
        // No server-side order endpoint exists, so checkout runs on
        // client generated order ids.
        let order_id = format!("order_{}", Uuid::new_v4().simple());
        let amount_minor = (amount * 100.0).round() as i64;

        Ok(PaymentOrder {
            order_id,
            amount_minor,
            currency: currency.to_string(),
        })
    }

    async fn open_checkout(&self, options: CheckoutOptions) -> Result<CheckoutEvent, PaymentError> {
        let key_id = self.key_id.clone().ok_or(PaymentError::NotConfigured)?;

        let (done, outcome) = oneshot::channel();
        let request = CheckoutRequest {
            key_id,
            options,
            done,
        };
        if self.surface.send(request).is_err() {
            return Ok(CheckoutEvent::Failed("checkout surface is gone".to_string()));
        }

        match outcome.await {
            Ok(event) => Ok(event),
            Err(_) => Ok(CheckoutEvent::Failed(
                "checkout surface dropped the request".to_string(),
            )),
        }
    }
}
