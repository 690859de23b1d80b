//! Orchestration layer for the Tallyboard billing console.
//!
//! Ties the pure reconciliation core to the REST client: snapshot
//! loading with a stale-response guard, inline edit synchronization with
//! optimistic local updates, transient notifications, the invoice
//! confirmation flow, and the typed PDF-renderer seam.

pub mod config;
pub mod console;
pub mod editor;
pub mod error;
pub mod loader;
pub mod notify;
pub mod pdf;
pub mod session;

pub use console::{Console, LoadStatus};
pub use error::ConsoleError;
