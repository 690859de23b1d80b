//! Domain logic for the Tallyboard billing console.
//!
//! Everything in this crate is pure and synchronous: the data model for
//! projects, subprojects, resources, productivity rates, billing records
//! and invoices, the lookup indices built over them, the two-pass
//! reconciliation engine that merges live assignments with historical
//! billing records, and the view projection (filter / sort / totals)
//! applied to the reconciled rows. Network access lives in
//! `tallyboard-client`; orchestration lives in `tallyboard-console`.

pub mod billing;
pub mod invoice;
pub mod project;
pub mod rates;
pub mod reconcile;
pub mod reference;
pub mod resource;
pub mod types;
pub mod view;
