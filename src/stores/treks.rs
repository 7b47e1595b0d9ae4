use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Deserialize;
use tracing::{debug, error};
use uuid::Uuid;

use crate::gateway::{Collection, Filter, Gateway, Order, RemoteCollections, SelectQuery};
use crate::models::{NewTrek, Trek, TrekCategory, TrekPatch};
use crate::stores::{Placement, ResourceStore, StoreError};

/// Shape of a `trek_categories` row with the trek embedded.
#[derive(Deserialize)]
struct CategoryLink {
    category_id: Uuid,
    #[serde(rename = "treks", default)]
    trek: Option<Trek>,
}

fn link_rows(trek_id: Uuid, categories: &[Uuid]) -> Result<Vec<serde_json::Value>, StoreError> {
    categories
        .iter()
        .map(|&category_id| {
            serde_json::to_value(TrekCategory {
                trek_id,
                category_id,
            })
            .map_err(StoreError::from)
        })
        .collect()
}

/// Trek list plus a per-category index.
///
/// The index is a TTL cache keyed by category id. Entries are filled
/// lazily on first lookup, or in bulk by [`TrekStore::warm_category_index`].
/// Any trek write empties the affected entries, so a stale grouping
/// lives at most one TTL.
pub struct TrekStore<C> {
    inner: ResourceStore<Trek, C>,
    by_category: Cache<Uuid, Arc<Vec<Trek>>>,
}

impl<C> TrekStore<C>
where
    C: RemoteCollections,
{
    pub fn new(gateway: Gateway<C>, index_ttl: Duration) -> Self {
        let inner = ResourceStore::new(
            gateway,
            Collection::Treks,
            "*",
            vec![Order::asc("start_date")],
            Placement::Last,
        );
        let by_category = Cache::builder().time_to_live(index_ttl).build();
        Self { inner, by_category }
    }

    /// Fetch every trek, soonest departure first, and cache the list.
    pub async fn refresh(&self) -> Result<Vec<Trek>, StoreError> {
        self.inner.refresh().await
    }

    pub async fn cached(&self) -> Vec<Trek> {
        self.inner.cached().await
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    /// Treks linked to one category, from the index when present.
    pub async fn treks_in_category(&self, category_id: Uuid) -> Result<Arc<Vec<Trek>>, StoreError> {
        if let Some(cached) = self.by_category.get(&category_id).await {
            return Ok(cached);
        }

        debug!("category index miss for {category_id}");
        let query = SelectQuery::default()
            .columns("*,trek_categories!inner(category_id)")
            .filter(Filter::new().eq("trek_categories.category_id", category_id))
            .order(vec![Order::asc("start_date")]);
        let rows = self.inner.client()?.select(Collection::Treks, query).await?;
        let treks = Arc::new(ResourceStore::<Trek, C>::decode_rows(rows)?);

        self.by_category.insert(category_id, treks.clone()).await;
        Ok(treks)
    }

    /// Index-only lookup. Returns an empty list when the category has no
    /// entry yet, without going to the server.
    pub async fn cached_in_category(&self, category_id: Uuid, limit: Option<usize>) -> Vec<Trek> {
        match self.by_category.get(&category_id).await {
            Some(treks) => match limit {
                Some(n) => treks.iter().take(n).cloned().collect(),
                None => treks.as_ref().clone(),
            },
            None => Vec::new(),
        }
    }

    /// Build the whole category index from one join query instead of a
    /// request per category.
    pub async fn warm_category_index(&self) -> Result<(), StoreError> {
        let query = SelectQuery::default().columns("category_id,treks(*)");
        let rows = self
            .inner
            .client()?
            .select(Collection::TrekCategories, query)
            .await?;

        let mut grouped: HashMap<Uuid, Vec<Trek>> = HashMap::new();
        for row in rows {
            let link: CategoryLink = serde_json::from_value(row)?;
            if let Some(trek) = link.trek {
                grouped.entry(link.category_id).or_default().push(trek);
            }
        }

        self.by_category.invalidate_all();
        for (category_id, mut treks) in grouped {
            treks.sort_by_key(|trek| trek.start_date);
            self.by_category.insert(category_id, Arc::new(treks)).await;
        }
        Ok(())
    }

    /// Create a trek and link it to the given categories.
    ///
    /// The trek row is the source of truth. If linking fails the trek
    /// still exists and is returned; the missing links are logged and can
    /// be re-applied from the admin screen.
    pub async fn create(&self, trek: &NewTrek, categories: &[Uuid]) -> Result<Trek, StoreError> {
        let created = self.inner.create(trek).await?;

        if !categories.is_empty() {
            let links = link_rows(created.id, categories)?;
            if let Err(e) = self
                .inner
                .client()?
                .insert(Collection::TrekCategories, links, None)
                .await
            {
                error!("trek {} created but category links failed: {e}", created.id);
            }
            for category_id in categories {
                self.by_category.invalidate(category_id).await;
            }
        }
        Ok(created)
    }

    /// Patch a trek and, when a category list is given, rewrite its
    /// membership to exactly that list.
    ///
    /// The rewrite runs after the patch lands. As with the link step of
    /// [`TrekStore::create`], a rewrite failure is logged and does not
    /// undo the already-saved patch.
    pub async fn update(
        &self,
        id: Uuid,
        patch: &TrekPatch,
        categories: Option<&[Uuid]>,
    ) -> Result<Trek, StoreError> {
        let updated = self.inner.update(id, patch).await?;
        if let Some(categories) = categories
            && let Err(e) = self.rewrite_links(id, categories).await
        {
            error!("trek {id} updated but category rewrite failed: {e}");
        }
        // Edits can move a trek within a category's date order, and a
        // rewrite changes which index entries hold it at all.
        self.by_category.invalidate_all();
        Ok(updated)
    }

    /// Replace the trek's `trek_categories` rows with links to exactly
    /// the given categories. An empty list clears the membership.
    async fn rewrite_links(&self, trek_id: Uuid, categories: &[Uuid]) -> Result<(), StoreError> {
        let client = self.inner.client()?;
        client
            .delete(Collection::TrekCategories, Filter::new().eq("trek_id", trek_id))
            .await?;
        if categories.is_empty() {
            return Ok(());
        }
        let links = link_rows(trek_id, categories)?;
        client.insert(Collection::TrekCategories, links, None).await?;
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner.delete(id).await?;
        self.by_category.invalidate_all();
        Ok(())
    }
}
