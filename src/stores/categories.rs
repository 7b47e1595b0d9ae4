use uuid::Uuid;

use crate::gateway::{Collection, Filter, Gateway, Order, RemoteCollections};
use crate::models::{Category, CategoryPatch, NewCategory};
use crate::stores::{Placement, ResourceStore, StoreError};

/// Category list with separate storefront and admin views.
pub struct CategoryStore<C> {
    inner: ResourceStore<Category, C>,
}

impl<C> CategoryStore<C>
where
    C: RemoteCollections,
{
    pub fn new(gateway: Gateway<C>) -> Self {
        let inner = ResourceStore::new(
            gateway,
            Collection::Categories,
            "*",
            vec![Order::asc("title")],
            Placement::Last,
        );
        Self { inner }
    }

    /// Fetch every category alphabetically and cache the list.
    pub async fn refresh(&self) -> Result<Vec<Category>, StoreError> {
        self.inner.refresh().await
    }

    /// Storefront view: active categories only.
    pub async fn refresh_active(&self) -> Result<Vec<Category>, StoreError> {
        self.inner
            .refresh_where(Filter::new().eq("is_active", true), vec![Order::asc("title")])
            .await
    }

    /// Admin view: everything, active categories listed first.
    pub async fn refresh_all(&self) -> Result<Vec<Category>, StoreError> {
        self.inner
            .refresh_where(
                Filter::new(),
                vec![Order::desc("is_active"), Order::asc("title")],
            )
            .await
    }

    pub async fn cached(&self) -> Vec<Category> {
        self.inner.cached().await
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    pub async fn create(&self, category: &NewCategory) -> Result<Category, StoreError> {
        self.inner.create(category).await
    }

    pub async fn update(&self, id: Uuid, patch: &CategoryPatch) -> Result<Category, StoreError> {
        self.inner.update(id, patch).await
    }

    /// Show or hide a category on the storefront.
    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<Category, StoreError> {
        let patch = CategoryPatch {
            is_active: Some(active),
            ..Default::default()
        };
        self.update(id, &patch).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner.delete(id).await
    }
}
