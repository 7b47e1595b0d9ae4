use serde_json::Value;
use tracing::debug;

use super::{Collection, Filter, GatewayError, Order, RemoteCollections, SelectQuery};

/// PostgREST client for a Supabase project.
///
/// Every request carries the anon key both as `apikey` and as a bearer
/// token, which is how Supabase expects unauthenticated clients to call
/// the REST surface. Row level security on the server decides what the
/// anon role may touch.
#[derive(Clone)]
pub struct SupabaseClient {
    client: reqwest::Client,
    rest_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
        }
    }

    fn request(&self, method: reqwest::Method, collection: Collection) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.rest_url, collection.name()))
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    fn apply_filter(
        mut request: reqwest::RequestBuilder,
        filter: &Filter,
    ) -> reqwest::RequestBuilder {
        for (column, value) in filter.clauses() {
            request = request.query(&[(column.as_str(), format!("eq.{value}"))]);
        }
        request
    }

    async fn read_rows(response: reqwest::Response) -> Result<Vec<Value>, GatewayError> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message: text,
            });
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

impl RemoteCollections for SupabaseClient {
    async fn select(
        &self,
        collection: Collection,
        query: SelectQuery,
    ) -> Result<Vec<Value>, GatewayError> {
        debug!("select {} from {}", query.columns, collection.name());

        let mut request = self
            .request(reqwest::Method::GET, collection)
            .query(&[("select", query.columns.as_str())]);
        request = Self::apply_filter(request, &query.filter);
        if let Some(order) = Order::render(&query.order) {
            request = request.query(&[("order", order.as_str())]);
        }

        let response = request.send().await?;
        Self::read_rows(response).await
    }

    async fn insert(
        &self,
        collection: Collection,
        rows: Vec<Value>,
        returning: Option<&str>,
    ) -> Result<Vec<Value>, GatewayError> {
        debug!("insert {} row(s) into {}", rows.len(), collection.name());

        let request = self.request(reqwest::Method::POST, collection).json(&rows);
        match returning {
            Some(columns) => {
                let response = request
                    .query(&[("select", columns)])
                    .header("Prefer", "return=representation")
                    .send()
                    .await?;
                Self::read_rows(response).await
            }
            None => {
                let response = request
                    .header("Prefer", "return=minimal")
                    .send()
                    .await?;
                Self::check_status(response).await?;
                Ok(Vec::new())
            }
        }
    }

    async fn update(
        &self,
        collection: Collection,
        filter: Filter,
        patch: Value,
        returning: &str,
    ) -> Result<Vec<Value>, GatewayError> {
        debug!("update {} where {:?}", collection.name(), filter);

        let mut request = self
            .request(reqwest::Method::PATCH, collection)
            .query(&[("select", returning)])
            .header("Prefer", "return=representation")
            .json(&patch);
        request = Self::apply_filter(request, &filter);

        let response = request.send().await?;
        Self::read_rows(response).await
    }

    async fn delete(&self, collection: Collection, filter: Filter) -> Result<(), GatewayError> {
        debug!("delete from {} where {:?}", collection.name(), filter);

        let mut request = self.request(reqwest::Method::DELETE, collection);
        request = Self::apply_filter(request, &filter);

        let response = request.send().await?;
        Self::check_status(response).await
    }
}
