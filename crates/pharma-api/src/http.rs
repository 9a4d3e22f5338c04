//! # HTTP Backend
//!
//! [`PharmacyBackend`] over the backend's JSON API, using `reqwest`.
//!
//! ## Response Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  send() ── Err ─────────────────────────────► ClientError::Transport    │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  status 2xx ──► body as JSON ── Err ────────► ClientError::Decode       │
//! │    │                  └──────── Ok ─────────► T                         │
//! │    │                                                                    │
//! │  status 404 ──► {"detail": "..."} ──────────► ClientError::NotFound     │
//! │    │                                                                    │
//! │  other ───────► {"detail": "..."} ──────────► ClientError::Rejected     │
//! │                 {"detail": [{"msg": ..}]}      { status, detail }       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use pharma_core::{
    DashboardStats, HealthStatus, MedicineId, MedicineInput, MedicineRecord, NewSale, SaleSummary,
};

use crate::backend::{CatalogQuery, PharmacyBackend};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// HTTP client for the pharmacy backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    http: Client,
}

impl HttpBackend {
    /// Builds a client from a validated configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url()?;
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(HttpBackend { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a path relative to the base URL (`/api/` prefix kept).
    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        Ok(self.http.request(method, url))
    }

    /// Sends a request and checks the status, returning the raw response.
    async fn execute(&self, request: RequestBuilder) -> ClientResult<Response> {
        let started = Instant::now();
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        debug!(%method, %url, "Backend request");
        let response = self.http.execute(request).await?;
        let status = response.status();
        debug!(
            %method,
            %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Backend response"
        );

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(&body);
        warn!(%method, %url, status = status.as_u16(), detail = ?detail, "Backend rejected request");

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(
                detail.unwrap_or_else(|| "Not found".to_string()),
            ));
        }

        Err(ClientError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }

    /// Sends a request and decodes a JSON body.
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = self.execute(request).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Extracts the human-readable reason from an error body.
///
/// The backend sends `{"detail": "reason"}`; request validation failures
/// (422) send `{"detail": [{"loc": [...], "msg": "reason", ...}, ...]}`.
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .map(|item| match item.get("msg").and_then(Value::as_str) {
                    Some(msg) => match item.get("loc").and_then(field_name) {
                        Some(field) => format!("{field}: {msg}"),
                        None => msg.to_string(),
                    },
                    None => item.to_string(),
                })
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Last string segment of a validation error location, e.g.
/// `["body", "mrp"]` → `mrp`.
fn field_name(loc: &Value) -> Option<&str> {
    loc.as_array()?.iter().rev().find_map(Value::as_str)
}

#[async_trait]
impl PharmacyBackend for HttpBackend {
    async fn dashboard_stats(&self) -> ClientResult<DashboardStats> {
        self.fetch(self.request(Method::GET, "dashboard/stats")?)
            .await
    }

    async fn recent_sales(&self, limit: u32) -> ClientResult<Vec<SaleSummary>> {
        let request = self
            .request(Method::GET, "dashboard/recent-sales")?
            .query(&[("limit", limit)]);
        self.fetch(request).await
    }

    async fn list_medicines(&self, query: &CatalogQuery) -> ClientResult<Vec<MedicineRecord>> {
        let mut request = self
            .request(Method::GET, "inventory/medicines")?
            .query(&[("skip", query.skip), ("limit", query.limit)]);

        if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            request = request.query(&[("search", search.trim())]);
        }

        self.fetch(request).await
    }

    async fn get_medicine(&self, id: MedicineId) -> ClientResult<MedicineRecord> {
        self.fetch(self.request(Method::GET, &format!("inventory/medicines/{id}"))?)
            .await
    }

    async fn create_medicine(&self, medicine: &MedicineInput) -> ClientResult<MedicineRecord> {
        let request = self
            .request(Method::POST, "inventory/medicines")?
            .json(medicine);
        self.fetch(request).await
    }

    async fn update_medicine(
        &self,
        id: MedicineId,
        medicine: &MedicineInput,
    ) -> ClientResult<MedicineRecord> {
        let request = self
            .request(Method::PUT, &format!("inventory/medicines/{id}"))?
            .json(medicine);
        self.fetch(request).await
    }

    async fn delete_medicine(&self, id: MedicineId) -> ClientResult<()> {
        self.execute(self.request(Method::DELETE, &format!("inventory/medicines/{id}"))?)
            .await?;
        Ok(())
    }

    async fn create_sale(&self, sale: &NewSale) -> ClientResult<SaleSummary> {
        let request = self.request(Method::POST, "sales/create-sale")?.json(sale);
        self.fetch(request).await
    }

    async fn health(&self) -> ClientResult<HealthStatus> {
        self.fetch(self.request(Method::GET, "health")?).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
