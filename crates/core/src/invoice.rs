//! Invoices: immutable snapshots over a set of billing records.

use serde::{Deserialize, Serialize};

use crate::billing::BillingRecord;
use crate::reconcile::RowSet;
use crate::types::{DbId, Timestamp};

/// An invoice as returned by `GET /invoices`, with its billing records
/// nested. Invoices have no update path; they are created once from a
/// set of record ids and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: DbId,
    pub invoice_number: String,
    #[serde(default)]
    pub billing_records: Vec<BillingRecord>,
    pub total_amount: f64,
    pub total_billable_amount: f64,
    pub total_non_billable_amount: f64,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

/// Billing-record ids eligible for invoicing from the current row set:
/// persisted rows with billable hours. Synthesized default rows (no
/// backing record) and zero-hour rows never make it onto an invoice.
pub fn invoiceable_record_ids(rows: &RowSet) -> Vec<DbId> {
    rows.values()
        .filter(|row| row.is_billable && row.hours > 0.0)
        .filter_map(|row| row.billing_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::ReconciledRow;

    fn row(
        resource_id: DbId,
        billing_id: Option<DbId>,
        hours: f64,
        billable: bool,
    ) -> ReconciledRow {
        ReconciledRow {
            project_id: 1,
            subproject_id: 10,
            resource_id,
            project_name: "Apollo".into(),
            subproject_name: "Backend".into(),
            resource_name: format!("R{resource_id}"),
            resource_role: "Engineer".into(),
            avatar_url: None,
            billing_id,
            hours,
            rate: 50.0,
            flatrate: 100.0,
            productivity: "Medium".into(),
            description: String::new(),
            is_billable: billable,
            is_editable: true,
        }
    }

    #[test]
    fn selects_only_saved_billable_rows_with_hours() {
        let mut rows = RowSet::new();
        for r in [
            row(1, Some(500), 10.0, true),  // eligible
            row(2, Some(501), 0.0, true),   // zero hours
            row(3, Some(502), 5.0, false),  // non-billable
            row(4, None, 8.0, true),        // never persisted
        ] {
            rows.insert(r.key(), r);
        }
        assert_eq!(invoiceable_record_ids(&rows), vec![500]);
    }

    #[test]
    fn empty_row_set_yields_no_ids() {
        assert!(invoiceable_record_ids(&RowSet::new()).is_empty());
    }

    #[test]
    fn invoice_created_at_uses_wire_name() {
        let json = serde_json::json!({
            "id": 1,
            "invoice_number": "INV-2025-0001",
            "total_amount": 1000.0,
            "total_billable_amount": 900.0,
            "total_non_billable_amount": 100.0,
            "createdAt": "2025-06-30T12:00:00Z"
        });
        let invoice: Invoice = serde_json::from_value(json).unwrap();
        assert_eq!(invoice.invoice_number, "INV-2025-0001");
        assert!(invoice.billing_records.is_empty());
    }
}
