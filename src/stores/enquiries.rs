use serde_json::json;
use uuid::Uuid;

use crate::gateway::{Collection, Gateway, Order, RemoteCollections};
use crate::models::{Enquiry, EnquiryStatus, NewEnquiry};
use crate::stores::{Placement, ResourceStore, StoreError};

/// Visitor enquiries, newest first, with the trek summary embedded.
pub struct EnquiryStore<C> {
    inner: ResourceStore<Enquiry, C>,
}

impl<C> EnquiryStore<C>
where
    C: RemoteCollections,
{
    pub fn new(gateway: Gateway<C>) -> Self {
        let inner = ResourceStore::new(
            gateway,
            Collection::Enquiries,
            "*,trek:treks(id,title,location,image_url)",
            vec![Order::desc("created_at")],
            Placement::First,
        );
        Self { inner }
    }

    pub async fn refresh(&self) -> Result<Vec<Enquiry>, StoreError> {
        self.inner.refresh().await
    }

    pub async fn cached(&self) -> Vec<Enquiry> {
        self.inner.cached().await
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    /// Record a new enquiry. The server stamps it `pending`.
    pub async fn submit(&self, enquiry: &NewEnquiry) -> Result<Enquiry, StoreError> {
        self.inner.create(enquiry).await
    }

    pub async fn set_status(&self, id: Uuid, status: EnquiryStatus) -> Result<Enquiry, StoreError> {
        self.inner.update(id, &json!({ "status": status })).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner.delete(id).await
    }
}
