//! Inline edit synchronization for editable billing rows.
//!
//! Edits are applied to local state first (optimistic), then persisted
//! as a create-or-update against the billing endpoint. A newly created
//! record's id is attached to the row so the next edit updates instead
//! of re-creating. If persistence fails the row reverts to its pre-edit
//! state and the error propagates for notification.

use tallyboard_client::payload::BillingPayload;
use tallyboard_client::BillingApi;
use tallyboard_core::billing::BillingKey;
use tallyboard_core::rates::{ProductivityLevel, RateTable};
use tallyboard_core::reconcile::{ReconciledRow, RowSet};
use tallyboard_core::types::DbId;

use crate::error::ConsoleError;

/// One inline edit to a reconciled row.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Hours(f64),
    /// Changing productivity re-resolves the cost rate from the
    /// subproject's rate table.
    Productivity(ProductivityLevel),
    Billable(bool),
    Description(String),
}

/// How a persisted edit landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// A new billing record was created and its id attached to the row.
    Created { billing_id: DbId },
    /// The row's existing billing record was updated in place.
    Updated,
}

/// Apply an edit to the row in local state, recomputing dependent
/// fields. Pure; does not touch the network.
fn apply_edit(
    row: &mut ReconciledRow,
    edit: &FieldEdit,
    rates: &RateTable,
) -> Result<(), ConsoleError> {
    match edit {
        FieldEdit::Hours(hours) => {
            if *hours < 0.0 {
                return Err(ConsoleError::Validation(format!(
                    "hours must be >= 0, got {hours}"
                )));
            }
            row.hours = *hours;
        }
        FieldEdit::Productivity(level) => {
            row.productivity = level.as_str().to_string();
            row.rate = rates.rate_or_zero(row.subproject_id, level.as_str());
        }
        FieldEdit::Billable(billable) => row.is_billable = *billable,
        FieldEdit::Description(description) => row.description = description.clone(),
    }
    Ok(())
}

fn editable_row<'a>(
    rows: &'a RowSet,
    key: BillingKey,
) -> Result<&'a ReconciledRow, ConsoleError> {
    let (subproject_id, resource_id) = key;
    let row = rows.get(&key).ok_or(ConsoleError::UnknownRow {
        subproject_id,
        resource_id,
    })?;
    if !row.is_editable {
        return Err(ConsoleError::ReadOnlyRow {
            subproject_id,
            resource_id,
        });
    }
    Ok(row)
}

/// Edit one field of an editable row and persist the result against the
/// active (month, year) period.
///
/// The local row is committed before the network call resolves; on
/// persistence failure it reverts to its pre-edit state.
pub async fn update_field(
    api: &BillingApi,
    rates: &RateTable,
    rows: &mut RowSet,
    key: BillingKey,
    edit: FieldEdit,
    month: u32,
    year: i32,
) -> Result<EditOutcome, ConsoleError> {
    let previous = editable_row(rows, key)?.clone();

    let mut edited = previous.clone();
    apply_edit(&mut edited, &edit, rates)?;

    // Optimistic local commit.
    rows.insert(key, edited.clone());

    let payload = BillingPayload::from_row(&edited, month, year);
    let result = match edited.billing_id {
        Some(billing_id) => api
            .update_billing(billing_id, &payload)
            .await
            .map(|_| EditOutcome::Updated),
        None => api.create_billing(&payload).await.map(|saved| {
            edited.billing_id = Some(saved.id);
            EditOutcome::Created {
                billing_id: saved.id,
            }
        }),
    };

    match result {
        Ok(outcome) => {
            // Re-commit so a freshly assigned billing id lands in state.
            rows.insert(key, edited);
            tracing::debug!(
                subproject_id = key.0,
                resource_id = key.1,
                ?outcome,
                "billing row persisted"
            );
            Ok(outcome)
        }
        Err(error) => {
            rows.insert(key, previous);
            Err(error.into())
        }
    }
}

/// Delete the row's billing record and reset the row to its unassigned
/// default shape: zero hours at the Medium rate, billable, no backing
/// record. The row itself stays while the assignment is live.
pub async fn delete_billing(
    api: &BillingApi,
    rates: &RateTable,
    rows: &mut RowSet,
    key: BillingKey,
) -> Result<(), ConsoleError> {
    let row = editable_row(rows, key)?;
    let billing_id = row.billing_id.ok_or_else(|| {
        ConsoleError::Validation("this row has no billing record to delete".into())
    })?;

    api.delete_billing(billing_id).await?;

    if let Some(row) = rows.get_mut(&key) {
        row.hours = 0.0;
        row.productivity = ProductivityLevel::Medium.as_str().to_string();
        row.rate = rates.default_rate(row.subproject_id);
        row.is_billable = true;
        row.billing_id = None;
        row.description.clear();
    }
    Ok(())
}
