use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

pub mod supabase;

pub use supabase::SupabaseClient;

/// The remote tables this app reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Treks,
    Categories,
    TrekCategories,
    Enquiries,
    Bookings,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Treks => "treks",
            Collection::Categories => "categories",
            Collection::TrekCategories => "trek_categories",
            Collection::Enquiries => "enquiries",
            Collection::Bookings => "bookings",
        }
    }
}

/// Conjunction of equality clauses, rendered as `column=eq.value` pairs.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.clauses.push((column.to_string(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[(String, String)] {
        &self.clauses
    }
}

/// Sort key for a read. Several keys render into one comma separated
/// `order` parameter, earlier keys taking precedence.
#[derive(Debug, Clone)]
pub struct Order {
    pub column: &'static str,
    pub ascending: bool,
}

impl Order {
    pub fn asc(column: &'static str) -> Self {
        Self {
            column,
            ascending: true,
        }
    }

    pub fn desc(column: &'static str) -> Self {
        Self {
            column,
            ascending: false,
        }
    }

    pub fn render(orders: &[Order]) -> Option<String> {
        if orders.is_empty() {
            return None;
        }
        let rendered = orders
            .iter()
            .map(|o| {
                let direction = if o.ascending { "asc" } else { "desc" };
                format!("{}.{direction}", o.column)
            })
            .collect::<Vec<_>>()
            .join(",");
        Some(rendered)
    }
}

/// A read against one collection: projected columns, filter, sort.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    pub columns: String,
    pub filter: Filter,
    pub order: Vec<Order>,
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self {
            columns: "*".to_string(),
            filter: Filter::new(),
            order: Vec::new(),
        }
    }
}

impl SelectQuery {
    pub fn columns(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn order(mut self, order: Vec<Order>) -> Self {
        self.order = order;
        self
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Row-level access to the remote collections. Implementations decide
/// the wire protocol; stores only see JSON rows.
#[allow(async_fn_in_trait)]
pub trait RemoteCollections {
    async fn select(
        &self,
        collection: Collection,
        query: SelectQuery,
    ) -> Result<Vec<Value>, GatewayError>;

    /// Inserts rows. With `returning` set, the server echoes the created
    /// rows projected to those columns; otherwise the reply is empty.
    async fn insert(
        &self,
        collection: Collection,
        rows: Vec<Value>,
        returning: Option<&str>,
    ) -> Result<Vec<Value>, GatewayError>;

    async fn update(
        &self,
        collection: Collection,
        filter: Filter,
        patch: Value,
        returning: &str,
    ) -> Result<Vec<Value>, GatewayError>;

    async fn delete(&self, collection: Collection, filter: Filter) -> Result<(), GatewayError>;
}

/// Handle to the remote backend. The app keeps working without one
/// configured, it just cannot reach any data.
pub enum Gateway<C> {
    Configured(Arc<C>),
    Unconfigured,
}

impl<C> Gateway<C> {
    pub fn configured(client: C) -> Self {
        Gateway::Configured(Arc::new(client))
    }

    pub fn client(&self) -> Option<&C> {
        match self {
            Gateway::Configured(client) => Some(client),
            Gateway::Unconfigured => None,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Gateway::Configured(_))
    }
}

impl<C> Clone for Gateway<C> {
    fn clone(&self) -> Self {
        match self {
            Gateway::Configured(client) => Gateway::Configured(Arc::clone(client)),
            Gateway::Unconfigured => Gateway::Unconfigured,
        }
    }
}
