//! Client for the catalog REST backend.
//!
//! Every endpoint answers with the same envelope:
//! `{ "success": bool, "data": ..., "error": "...", "message": "..." }`.

mod auth;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::CatalogError;
use crate::models::{Category, Product};

const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &Client {
        &self.client
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.get_json("/categories", &[]).await
    }

    /// Products, optionally limited to one category.
    pub async fn list_products(&self, category: Option<&str>) -> Result<Vec<Product>, CatalogError> {
        let query: Vec<(&str, &str)> = category.map(|c| ("category", c)).into_iter().collect();
        self.get_json("/products", &query).await
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, CatalogError> {
        let path = format!("/products/{}", urlencoding::encode(id));
        self.get_json(&path, &[]).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let url = self.endpoint(path);
        tracing::debug!(url = %url, "Fetching catalog data");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, url = %url, "Catalog request failed");
                CatalogError::network(e)
            })?;

        Self::read_envelope(response).await?.ok_or_else(missing_data)
    }

    /// POST a JSON body. `data` is optional on these endpoints.
    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, CatalogError> {
        let url = self.endpoint(path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, url = %url, "Catalog request failed");
                CatalogError::network(e)
            })?;

        Self::read_envelope(response).await
    }

    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Option<T>, CatalogError> {
        let status = response.status();
        let body = response.text().await.map_err(CatalogError::network)?;
        decode_envelope(status, &body)
    }
}

/// Unwrap the `{ success, data }` envelope.
///
/// Error responses usually still carry the envelope, so the body is parsed
/// before the status is considered.
fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<Option<T>, CatalogError> {
    let envelope: ApiEnvelope<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => return Err(CatalogError::decode(e)),
        Err(_) => {
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.trim().to_string()
            };
            return Err(CatalogError::Api {
                status: Some(status.as_u16()),
                message,
            });
        }
    };

    if !envelope.success {
        let message = envelope
            .error
            .or(envelope.message)
            .unwrap_or_else(|| "request was not successful".to_string());
        return Err(CatalogError::Api {
            status: Some(status.as_u16()),
            message,
        });
    }

    Ok(envelope.data)
}

fn missing_data() -> CatalogError {
    CatalogError::Decode("response has no data".into())
}
