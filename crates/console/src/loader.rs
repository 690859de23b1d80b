//! Snapshot loading: fetch everything a reconciliation run needs.
//!
//! Reference data, billing records, and rate tables are fetched fresh on
//! every run (no cross-run cache); the reconciliation engine has no
//! defined behavior on partial data, so a snapshot either loads
//! completely or the whole load fails.

use tallyboard_client::{ApiClientError, BillingApi};
use tallyboard_core::billing::MergedBilling;
use tallyboard_core::rates::RateTable;
use tallyboard_core::reconcile::ReconcileScope;
use tallyboard_core::reference::ReferenceIndex;
use tallyboard_core::types::DbId;

use crate::error::ConsoleError;

/// The active view filter: a billing period plus an optional
/// project/subproject selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodFilter {
    /// 1-12.
    pub month: u32,
    pub year: i32,
    pub project_id: Option<DbId>,
    pub subproject_id: Option<DbId>,
}

impl PeriodFilter {
    pub fn new(month: u32, year: i32) -> Self {
        Self {
            month,
            year,
            project_id: None,
            subproject_id: None,
        }
    }

    pub fn with_subproject(mut self, project_id: DbId, subproject_id: DbId) -> Self {
        self.project_id = Some(project_id);
        self.subproject_id = Some(subproject_id);
        self
    }

    pub fn validate(&self) -> Result<(), ConsoleError> {
        if !(1..=12).contains(&self.month) {
            return Err(ConsoleError::Validation(format!(
                "month must be 1-12, got {}",
                self.month
            )));
        }
        Ok(())
    }

    /// The reconciliation scope this filter selects.
    pub fn scope(&self) -> ReconcileScope {
        match self.subproject_id {
            Some(id) => ReconcileScope::Subproject(id),
            None => ReconcileScope::All,
        }
    }
}

/// Everything one reconciliation run consumes, fetched as of one load.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub filter: PeriodFilter,
    pub reference: ReferenceIndex,
    pub rates: RateTable,
    pub billing: MergedBilling,
}

/// Fetch a complete snapshot for the given filter.
///
/// The project tree, resource roster, and both billing fetches go out
/// concurrently; rate fetches fan out once the tree determines which
/// subprojects are in scope. A failed rate fetch for an individual
/// subproject degrades to an empty list (rows there default to rate 0);
/// any other failure aborts the whole load.
pub async fn load_snapshot(
    api: &BillingApi,
    filter: &PeriodFilter,
) -> Result<Snapshot, ApiClientError> {
    let (tree, resources, period, templates) = tokio::try_join!(
        api.project_subproject_tree(),
        api.list_resources(),
        api.period_billing(filter.month, filter.year, filter.subproject_id),
        api.template_billing(filter.subproject_id),
    )?;

    let reference = ReferenceIndex::build(tree, resources);

    let subproject_ids = match filter.subproject_id {
        Some(id) => vec![id],
        None => reference.subproject_ids(),
    };
    let fetches = subproject_ids.iter().map(|&subproject_id| async move {
        match api.productivity_rates(subproject_id).await {
            Ok(rates) => rates,
            Err(error) => {
                tracing::warn!(subproject_id, %error, "rate fetch failed, using empty table");
                Vec::new()
            }
        }
    });
    let rate_lists = futures::future::join_all(fetches).await;

    let mut rates = RateTable::new();
    for (subproject_id, list) in subproject_ids.into_iter().zip(rate_lists) {
        rates.insert(subproject_id, list);
    }

    let billing = MergedBilling::merge(period, templates);
    tracing::debug!(
        month = filter.month,
        year = filter.year,
        subproject_id = ?filter.subproject_id,
        records = billing.len(),
        "snapshot loaded"
    );

    Ok(Snapshot {
        filter: *filter,
        reference,
        rates,
        billing,
    })
}
