use crate::prisma::auth::Session;
use crate::prisma::{create_http_client, AUTH_HEADER, QUERY_TIMEOUT};
use crate::utils::errors::Result;
use reqwest::{Client, Response};
use serde_json::{json, Value};

pub struct PrismaClient {
    client: Client,
    api_url: String,
}

impl PrismaClient {
    pub fn new(api_url: String) -> Self {
        let client = create_http_client(QUERY_TIMEOUT).expect("Failed to create HTTP client");

        Self { client, api_url }
    }

    /// Get API base URL
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Run an RQL config search.
    ///
    /// Returns the parsed response body, or `None` when the request failed.
    /// Request failures are logged with their diagnostic detail, never
    /// propagated; the caller treats `None` as "no data".
    pub async fn search_config(
        &self,
        session: &Session,
        query: &str,
        limit: u32,
    ) -> Result<Option<Value>> {
        let url = format!("{}/search/config", self.api_url);

        // The search API requires a timeRange object; to_now over epoch
        // covers all historical data.
        let payload = json!({
            "query": query,
            "timeRange": {
                "type": "to_now",
                "value": "epoch"
            },
            "limit": limit
        });

        tracing::info!("Executing RQL search against {}", url);
        tracing::debug!("Query: {}", query);

        self.post(session, &url, payload, "search").await
    }

    /// Fetch raw details for a single asset by RRN or UAI.
    ///
    /// Same no-data contract as [`search_config`](Self::search_config).
    pub async fn asset_details(&self, session: &Session, asset_id: &str) -> Result<Option<Value>> {
        let url = format!("{}/uai/v1/asset", self.api_url);

        // type "asset" selects the general raw configuration details
        let payload = json!({
            "assetId": asset_id,
            "type": "asset"
        });

        tracing::info!("Fetching details for asset {} from {}", asset_id, url);

        self.post(session, &url, payload, "asset lookup").await
    }

    /// One authenticated POST with the session token attached
    async fn post(
        &self,
        session: &Session,
        url: &str,
        payload: Value,
        context: &str,
    ) -> Result<Option<Value>> {
        let response = match self
            .client
            .post(url)
            .header(AUTH_HEADER, session.token())
            .header("Content-Type", "application/json; charset=UTF-8")
            .header("Accept", "application/json; charset=UTF-8")
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("An error occurred during {context}: {e}");
                return Ok(None);
            }
        };

        self.handle_response(response, context).await
    }

    /// Split a response by status: 2xx parses, anything else is no-data
    async fn handle_response(&self, response: Response, context: &str) -> Result<Option<Value>> {
        let status = response.status();

        if status.is_success() {
            Ok(Some(response.json().await?))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "No response body".to_string());
            tracing::error!("HTTP error during {context}: {status} - response body: {error_text}");
            Ok(None)
        }
    }
}
