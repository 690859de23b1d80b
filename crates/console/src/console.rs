//! The console state machine: one loaded billing period, its reconciled
//! rows, the presentation options over them, and the operations the
//! pages expose (reload, inline edit, delete, invoice generation).
//!
//! Every failure path ends in a transient notice; no operation panics or
//! leaves the console unusable.

use tallyboard_client::payload::InvoiceRequest;
use tallyboard_client::BillingApi;
use tallyboard_core::billing::BillingKey;
use tallyboard_core::invoice::invoiceable_record_ids;
use tallyboard_core::rates::RateTable;
use tallyboard_core::reconcile::{reconcile, ReconciledRow, RowSet};
use tallyboard_core::types::DbId;
use tallyboard_core::view::{project_rows, totals, SortKey, SortSpec, Totals, TotalsPolicy, ViewOptions};

use crate::editor::{self, EditOutcome, FieldEdit};
use crate::error::ConsoleError;
use crate::loader::{load_snapshot, PeriodFilter, Snapshot};
use crate::notify::{Notice, NoticeLog};
use crate::session::UserSession;

/// Outcome of a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The snapshot was accepted and reconciled into `rows` rows.
    Loaded { rows: usize },
    /// The response resolved after a newer reload started; discarded.
    Stale,
    /// The load failed; dependent views are empty until the user retries.
    Failed,
}

/// A prepared, not-yet-submitted invoice: the human confirmation step
/// between selecting records and the irreversible POST.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    pub month: u32,
    pub year: i32,
    record_ids: Vec<DbId>,
}

impl InvoiceDraft {
    pub fn record_count(&self) -> usize {
        self.record_ids.len()
    }
}

/// One user's view of one billing period.
pub struct Console {
    api: BillingApi,
    session: UserSession,
    policy: TotalsPolicy,
    filter: PeriodFilter,
    /// Monotonically increasing load stamp; responses from older loads
    /// are discarded instead of overwriting newer state.
    generation: u64,
    rows: RowSet,
    rates: RateTable,
    view: ViewOptions,
    notices: NoticeLog,
}

impl Console {
    pub fn new(
        api: BillingApi,
        session: UserSession,
        policy: TotalsPolicy,
        filter: PeriodFilter,
    ) -> Self {
        Self {
            api,
            session,
            policy,
            filter,
            generation: 0,
            rows: RowSet::new(),
            rates: RateTable::new(),
            view: ViewOptions::all_visible(),
            notices: NoticeLog::new(),
        }
    }

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    pub fn filter(&self) -> &PeriodFilter {
        &self.filter
    }

    /// Re-fetch everything for the active filter and reconcile.
    ///
    /// State is cleared up front: a failed load leaves the views empty
    /// rather than showing rows from a previous filter.
    pub async fn reload(&mut self) -> LoadStatus {
        if let Err(error) = self.filter.validate() {
            self.notices.error(error.to_string());
            return LoadStatus::Failed;
        }

        self.generation += 1;
        let generation = self.generation;
        self.rows.clear();

        match load_snapshot(&self.api, &self.filter).await {
            Ok(snapshot) => self.accept_snapshot(generation, snapshot),
            Err(error) => {
                self.notices.error(format!("Failed to load billing data: {error}"));
                LoadStatus::Failed
            }
        }
    }

    /// Switch the active filter and reload.
    pub async fn set_filter(&mut self, filter: PeriodFilter) -> LoadStatus {
        self.filter = filter;
        self.reload().await
    }

    /// Accept a resolved snapshot unless a newer reload has started (or
    /// the filter moved on) since it was issued.
    fn accept_snapshot(&mut self, generation: u64, snapshot: Snapshot) -> LoadStatus {
        if generation != self.generation || snapshot.filter != self.filter {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding stale snapshot"
            );
            return LoadStatus::Stale;
        }

        self.rows = reconcile(
            &snapshot.reference,
            &snapshot.rates,
            &snapshot.billing,
            snapshot.filter.scope(),
        );
        self.rates = snapshot.rates;
        let count = self.rows.len();
        self.notices.info(format!(
            "{count} records loaded for {}/{}",
            self.filter.month, self.filter.year
        ));
        LoadStatus::Loaded { rows: count }
    }

    // -- Row access and view projection --

    pub fn rows(&self) -> &RowSet {
        &self.rows
    }

    pub fn row(&self, key: BillingKey) -> Option<&ReconciledRow> {
        self.rows.get(&key)
    }

    /// The filtered, sorted rows for rendering.
    pub fn visible_rows(&self) -> Vec<&ReconciledRow> {
        project_rows(&self.rows, &self.view)
    }

    pub fn totals(&self) -> Totals {
        totals(&self.rows, self.policy)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.view.search = search.into();
    }

    /// Flip non-billable visibility; returns the new setting.
    pub fn toggle_non_billable(&mut self) -> bool {
        self.view.show_non_billable = !self.view.show_non_billable;
        self.view.show_non_billable
    }

    /// Column-header click: same key flips direction, new key resets
    /// ascending.
    pub fn request_sort(&mut self, key: SortKey) {
        self.view.sort = Some(SortSpec::request(self.view.sort, key));
    }

    pub fn view(&self) -> &ViewOptions {
        &self.view
    }

    // -- Inline edits --

    /// Edit one field of an editable row, persisting create-or-update.
    /// Failures surface as notices; the row reverts on a failed save.
    pub async fn update_field(&mut self, key: BillingKey, edit: FieldEdit) -> Option<EditOutcome> {
        let result = editor::update_field(
            &self.api,
            &self.rates,
            &mut self.rows,
            key,
            edit,
            self.filter.month,
            self.filter.year,
        )
        .await;
        match result {
            Ok(outcome) => {
                self.notices.info("Billing record saved");
                Some(outcome)
            }
            Err(error) => {
                self.notices.error(error.to_string());
                None
            }
        }
    }

    /// Delete the row's billing record, resetting it to the default
    /// shape. Returns whether the delete went through.
    pub async fn delete_row_billing(&mut self, key: BillingKey) -> bool {
        match editor::delete_billing(&self.api, &self.rates, &mut self.rows, key).await {
            Ok(()) => {
                self.notices.info("Billing record deleted");
                true
            }
            Err(error) => {
                self.notices.error(error.to_string());
                false
            }
        }
    }

    // -- Invoice generation --

    /// Select the invoiceable records for the active period. Errors when
    /// nothing is eligible; submission only happens via
    /// [`confirm_invoice`](Self::confirm_invoice).
    pub fn prepare_invoice(&mut self) -> Result<InvoiceDraft, ConsoleError> {
        let record_ids = invoiceable_record_ids(&self.rows);
        if record_ids.is_empty() {
            let message =
                "No billable hours to invoice for this period, or records haven't been saved yet";
            self.notices.error(message);
            return Err(ConsoleError::Validation(message.into()));
        }
        Ok(InvoiceDraft {
            month: self.filter.month,
            year: self.filter.year,
            record_ids,
        })
    }

    /// Submit a confirmed draft. Returns the new invoice number, or
    /// `None` with an error notice.
    pub async fn confirm_invoice(&mut self, draft: InvoiceDraft) -> Option<String> {
        let request = InvoiceRequest {
            billing_records: draft.record_ids,
            month: draft.month,
            year: draft.year,
        };
        match self.api.create_invoice(&request).await {
            Ok(created) => {
                self.notices.info(format!(
                    "Invoice {} created successfully",
                    created.invoice_number
                ));
                Some(created.invoice_number)
            }
            Err(error) => {
                self.notices.error(format!("Invoice creation failed: {error}"));
                None
            }
        }
    }

    // -- Notices --

    /// Take all pending transient notices for display.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }
}
