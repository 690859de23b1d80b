//! Write payloads and thin response shapes for the billing endpoints.

use serde::{Deserialize, Serialize};

use tallyboard_core::billing::BillableStatus;
use tallyboard_core::reconcile::ReconciledRow;
use tallyboard_core::types::DbId;

/// Body of `POST /billing` and `PUT /billing/{id}`.
///
/// Carries the full computed row, including the derived `costing`
/// (hours x rate) and `total_amount` (hours x flat rate) figures the
/// backend stores alongside the inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingPayload {
    pub project_id: DbId,
    pub subproject_id: DbId,
    pub resource_id: DbId,
    pub hours: f64,
    pub productivity_level: String,
    pub rate: f64,
    pub flatrate: f64,
    pub costing: f64,
    pub total_amount: f64,
    pub description: String,
    pub billable_status: BillableStatus,
    /// Saving always pins the record to the active period; a template
    /// record updated through this payload stops being a template.
    pub month: u32,
    pub year: i32,
}

impl BillingPayload {
    /// Build the persistence payload for a reconciled row against the
    /// active (month, year) filter.
    pub fn from_row(row: &ReconciledRow, month: u32, year: i32) -> Self {
        Self {
            project_id: row.project_id,
            subproject_id: row.subproject_id,
            resource_id: row.resource_id,
            hours: row.hours,
            productivity_level: row.productivity.clone(),
            rate: row.rate,
            flatrate: row.flatrate,
            costing: row.costing(),
            total_amount: row.total_bill(),
            description: row.description.clone(),
            billable_status: if row.is_billable {
                BillableStatus::Billable
            } else {
                BillableStatus::NonBillable
            },
            month,
            year,
        }
    }
}

/// The identifying slice of a saved billing record. The backend echoes
/// the full record; only the id is needed to reconcile local state.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedBilling {
    pub id: DbId,
}

/// Body of `POST /invoices`.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceRequest {
    pub billing_records: Vec<DbId>,
    pub month: u32,
    pub year: i32,
}

/// Response of `POST /invoices`.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceCreated {
    pub id: DbId,
    pub invoice_number: String,
}
