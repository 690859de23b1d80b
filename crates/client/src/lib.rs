//! REST client for the Tallyboard billing backend.
//!
//! Wraps the backend's HTTP endpoints (projects, resources, productivity
//! rates, billing records, invoices) behind typed async methods on
//! [`api::BillingApi`], with write payloads in [`payload`].

pub mod api;
pub mod payload;

pub use api::{ApiClientError, BillingApi};
