use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::gateway::{
    Collection, Filter, Gateway, GatewayError, Order, RemoteCollections, SelectQuery,
};
use crate::models::Identified;

pub mod bookings;
pub mod categories;
pub mod enquiries;
pub mod treks;

pub use bookings::BookingStore;
pub use categories::CategoryStore;
pub use enquiries::EnquiryStore;
pub use treks::TrekStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("remote data gateway is not configured")]
    NotConfigured,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("invalid row payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("no {collection} row matched id {id}")]
    NotFound { collection: &'static str, id: Uuid },
    #[error("{collection} insert returned no row")]
    EmptyReply { collection: &'static str },
}

/// Where a freshly created row lands in the cached list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    First,
    Last,
}

/// Remote-backed cache for one collection.
///
/// Reads replace the cached list wholesale; writes go to the server
/// first and patch the cache only after the server confirmed them, so a
/// failed write never leaves a phantom row behind. The cached list is
/// what the UI renders between refreshes.
pub struct ResourceStore<T, C> {
    gateway: Gateway<C>,
    collection: Collection,
    columns: &'static str,
    order: Vec<Order>,
    placement: Placement,
    cache: RwLock<Vec<T>>,
}

impl<T, C> ResourceStore<T, C>
where
    T: Identified + Clone + DeserializeOwned,
    C: RemoteCollections,
{
    pub fn new(
        gateway: Gateway<C>,
        collection: Collection,
        columns: &'static str,
        order: Vec<Order>,
        placement: Placement,
    ) -> Self {
        Self {
            gateway,
            collection,
            columns,
            order,
            placement,
            cache: RwLock::new(Vec::new()),
        }
    }

    fn client(&self) -> Result<&C, StoreError> {
        self.gateway.client().ok_or(StoreError::NotConfigured)
    }

    fn decode_rows(rows: Vec<serde_json::Value>) -> Result<Vec<T>, StoreError> {
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(StoreError::from))
            .collect()
    }

    /// Fetch every row and replace the cache with the result.
    pub async fn refresh(&self) -> Result<Vec<T>, StoreError> {
        self.refresh_where(Filter::new(), self.order.clone()).await
    }

    /// Fetch the rows matching `filter` and replace the cache with them.
    pub async fn refresh_where(
        &self,
        filter: Filter,
        order: Vec<Order>,
    ) -> Result<Vec<T>, StoreError> {
        let rows = self.fetch(filter, order).await?;
        *self.cache.write().await = rows.clone();
        Ok(rows)
    }

    /// Fetch matching rows without touching the cache.
    pub async fn fetch_where(&self, filter: Filter) -> Result<Vec<T>, StoreError> {
        self.fetch(filter, self.order.clone()).await
    }

    async fn fetch(&self, filter: Filter, order: Vec<Order>) -> Result<Vec<T>, StoreError> {
        let query = SelectQuery::default()
            .columns(self.columns)
            .filter(filter)
            .order(order);
        let rows = self.client()?.select(self.collection, query).await?;
        Self::decode_rows(rows)
    }

    /// Create a row and append the server's representation to the cache.
    pub async fn create(&self, payload: &impl Serialize) -> Result<T, StoreError> {
        let row = serde_json::to_value(payload)?;
        let mut rows = self
            .client()?
            .insert(self.collection, vec![row], Some(self.columns))
            .await?;
        if rows.is_empty() {
            return Err(StoreError::EmptyReply {
                collection: self.collection.name(),
            });
        }
        let created: T = serde_json::from_value(rows.remove(0))?;

        let mut cache = self.cache.write().await;
        match self.placement {
            Placement::First => cache.insert(0, created.clone()),
            Placement::Last => cache.push(created.clone()),
        }
        Ok(created)
    }

    /// Patch a row by id. The cached entry is swapped for the server's
    /// representation, so computed and embedded columns stay current.
    pub async fn update(&self, id: Uuid, patch: &impl Serialize) -> Result<T, StoreError> {
        let patch = serde_json::to_value(patch)?;
        let mut rows = self
            .client()?
            .update(self.collection, Filter::new().eq("id", id), patch, self.columns)
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound {
                collection: self.collection.name(),
                id,
            });
        }
        let updated: T = serde_json::from_value(rows.remove(0))?;

        let mut cache = self.cache.write().await;
        if let Some(pos) = cache.iter().position(|entry| entry.id() == id) {
            cache[pos] = updated.clone();
        }
        Ok(updated)
    }

    /// Delete a row by id and prune it from the cache.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.client()?
            .delete(self.collection, Filter::new().eq("id", id))
            .await?;
        self.cache.write().await.retain(|entry| entry.id() != id);
        Ok(())
    }

    /// Snapshot of the cached list.
    pub async fn cached(&self) -> Vec<T> {
        self.cache.read().await.clone()
    }

    pub fn is_configured(&self) -> bool {
        self.gateway.is_configured()
    }
}
