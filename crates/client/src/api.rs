//! HTTP client for the billing backend's REST endpoints.
//!
//! One [`BillingApi`] wraps a [`reqwest::Client`] plus a base URL and
//! exposes a typed async method per endpoint. Transport failures and
//! non-2xx responses are split into distinct error variants so callers
//! can surface the backend's message payload verbatim.

use tallyboard_core::billing::BillingRecord;
use tallyboard_core::invoice::Invoice;
use tallyboard_core::project::Project;
use tallyboard_core::rates::ProductivityRate;
use tallyboard_core::resource::Resource;
use tallyboard_core::types::DbId;

use crate::payload::{BillingPayload, InvoiceCreated, InvoiceRequest, SavedBilling};

/// Errors from the billing REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Billing API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the response body.
        message: String,
    },
}

/// HTTP client for a single billing backend.
#[derive(Debug, Clone)]
pub struct BillingApi {
    client: reqwest::Client,
    base_url: String,
}

impl BillingApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://host:3000/api`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /project` - flat project listing.
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiClientError> {
        let response = self
            .client
            .get(format!("{}/project", self.base_url))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /project/project-subproject` - projects with their
    /// subprojects nested.
    pub async fn project_subproject_tree(&self) -> Result<Vec<Project>, ApiClientError> {
        let response = self
            .client
            .get(format!("{}/project/project-subproject", self.base_url))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /resource` - the full resource roster with current
    /// assignments.
    pub async fn list_resources(&self) -> Result<Vec<Resource>, ApiClientError> {
        let response = self
            .client
            .get(format!("{}/resource", self.base_url))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /productivity?subproject_id=` - configured rate tiers for one
    /// subproject.
    pub async fn productivity_rates(
        &self,
        subproject_id: DbId,
    ) -> Result<Vec<ProductivityRate>, ApiClientError> {
        let response = self
            .client
            .get(format!(
                "{}/productivity?subproject_id={subproject_id}",
                self.base_url
            ))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /billing?month=M&year=Y[&subproject_id=]` - period-specific
    /// billing records.
    pub async fn period_billing(
        &self,
        month: u32,
        year: i32,
        subproject_id: Option<DbId>,
    ) -> Result<Vec<BillingRecord>, ApiClientError> {
        let mut url = format!("{}/billing?month={month}&year={year}", self.base_url);
        if let Some(id) = subproject_id {
            url.push_str(&format!("&subproject_id={id}"));
        }
        let response = self.client.get(url).send().await?;
        Self::parse_response(response).await
    }

    /// `GET /billing?month=null[&subproject_id=]` - unassigned template
    /// records not yet tied to a billing period.
    pub async fn template_billing(
        &self,
        subproject_id: Option<DbId>,
    ) -> Result<Vec<BillingRecord>, ApiClientError> {
        let mut url = format!("{}/billing?month=null", self.base_url);
        if let Some(id) = subproject_id {
            url.push_str(&format!("&subproject_id={id}"));
        }
        let response = self.client.get(url).send().await?;
        Self::parse_response(response).await
    }

    /// `POST /billing` - create a billing record, returning its new id.
    pub async fn create_billing(
        &self,
        payload: &BillingPayload,
    ) -> Result<SavedBilling, ApiClientError> {
        let response = self
            .client
            .post(format!("{}/billing", self.base_url))
            .json(payload)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `PUT /billing/{id}` - update an existing billing record with the
    /// full computed payload.
    pub async fn update_billing(
        &self,
        id: DbId,
        payload: &BillingPayload,
    ) -> Result<SavedBilling, ApiClientError> {
        let response = self
            .client
            .put(format!("{}/billing/{id}", self.base_url))
            .json(payload)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `DELETE /billing/{id}`.
    pub async fn delete_billing(&self, id: DbId) -> Result<(), ApiClientError> {
        let response = self
            .client
            .delete(format!("{}/billing/{id}", self.base_url))
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// `POST /invoices` - create an immutable invoice over a set of
    /// billing-record ids.
    pub async fn create_invoice(
        &self,
        request: &InvoiceRequest,
    ) -> Result<InvoiceCreated, ApiClientError> {
        let response = self
            .client
            .post(format!("{}/invoices", self.base_url))
            .json(request)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /invoices` - all invoices with their billing records nested.
    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, ApiClientError> {
        let response = self
            .client
            .get(format!("{}/invoices", self.base_url))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. On failure, pull
    /// the human-readable message out of the JSON body when the backend
    /// provided one.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let message = extract_error_message(&body);
            tracing::warn!(status = status.as_u16(), %message, "billing API request failed");
            return Err(ApiClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Pull the `message` (or `error`) field out of a JSON error body,
/// falling back to the raw body for non-JSON responses.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["message", "error"] {
            if let Some(message) = value.get(field).and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }
    }
    body.to_string()
}
