//! Two-pass reconciliation of assignments against billing records.
//!
//! Pass 1 walks every resource's *current* subproject assignments and
//! produces one editable row per (subproject, resource) pair, projecting
//! the matching billing record when one exists and synthesizing a default
//! row otherwise. Pass 2 surfaces the remaining billing records as frozen
//! historical rows: resources that were unassigned, reassigned, or
//! deleted since the record was written. Null-month templates that no
//! live assignment claimed are suppressed entirely.
//!
//! The output is keyed by (subproject id, resource id) in a `BTreeMap`,
//! so a fixed input snapshot always reconciles to the identical row set.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::billing::{BillableStatus, BillingKey, BillingRecord, MergedBilling};
use crate::project::Subproject;
use crate::rates::{ProductivityLevel, RateTable};
use crate::reference::ReferenceIndex;
use crate::resource::{deleted_resource_name, Resource, DELETED_RESOURCE_AVATAR};
use crate::types::DbId;

/// Which assignments and records a reconciliation run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileScope {
    /// Every subproject reachable from the loaded project tree.
    All,
    /// A single selected subproject.
    Subproject(DbId),
}

impl ReconcileScope {
    fn includes(self, subproject_id: DbId) -> bool {
        match self {
            Self::All => true,
            Self::Subproject(id) => id == subproject_id,
        }
    }
}

/// One line of the billing table: Resource x Subproject x BillingRecord x
/// ProductivityRate, flattened for display and editing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledRow {
    pub project_id: DbId,
    pub subproject_id: DbId,
    pub resource_id: DbId,
    pub project_name: String,
    pub subproject_name: String,
    pub resource_name: String,
    pub resource_role: String,
    pub avatar_url: Option<String>,
    /// Backing billing record, absent for synthesized default rows.
    pub billing_id: Option<DbId>,
    pub hours: f64,
    /// Internal cost rate.
    pub rate: f64,
    /// Revenue rate charged to the client.
    pub flatrate: f64,
    /// Level name as stored; canonical values are Low/Medium/High/Best.
    pub productivity: String,
    pub description: String,
    pub is_billable: bool,
    /// True only while the resource is currently assigned to the
    /// subproject; historical rows render read-only.
    pub is_editable: bool,
}

impl ReconciledRow {
    pub fn key(&self) -> BillingKey {
        (self.subproject_id, self.resource_id)
    }

    /// Internal cost of the row: hours x cost rate.
    pub fn costing(&self) -> f64 {
        self.hours * self.rate
    }

    /// Client-facing bill of the row: hours x flat rate.
    pub fn total_bill(&self) -> f64 {
        self.hours * self.flatrate
    }
}

/// The deduplicated, deterministic result of a reconciliation run.
pub type RowSet = BTreeMap<BillingKey, ReconciledRow>;

/// Merge current assignments, billing records, and rate tables into one
/// deduplicated row set. See the module docs for the two-pass algorithm.
pub fn reconcile(
    reference: &ReferenceIndex,
    rates: &RateTable,
    billing: &MergedBilling,
    scope: ReconcileScope,
) -> RowSet {
    let mut rows = RowSet::new();

    // Pass 1: active assignments, editable.
    for resource in reference.resources() {
        for &subproject_id in &resource.assigned_subprojects {
            if !scope.includes(subproject_id) {
                continue;
            }
            let Some((project, subproject)) = reference.resolve_subproject(subproject_id) else {
                tracing::debug!(subproject_id, resource_id = resource.id, "skipping dangling assignment");
                continue;
            };
            let key = (subproject_id, resource.id);
            let row = match billing.get(key) {
                Some(record) => project_record(project.id, &project.name, subproject, resource, record),
                None => default_row(project.id, &project.name, subproject, resource, rates),
            };
            rows.insert(key, row);
        }
    }

    // Pass 2: historical and orphaned records, frozen. Pass 1 rows are
    // never overwritten; this only fills gaps.
    for (&key, record) in billing.iter() {
        if rows.contains_key(&key) {
            continue;
        }
        // Unclaimed templates are defaults, not history.
        if record.is_template() {
            continue;
        }
        if !scope.includes(record.subproject_id) {
            continue;
        }
        let Some((project, subproject)) = reference.resolve_subproject(record.subproject_id)
        else {
            tracing::debug!(
                subproject_id = record.subproject_id,
                billing_id = record.id,
                "skipping billing record for unresolvable subproject"
            );
            continue;
        };
        let row = historical_row(project.id, &project.name, subproject, reference, record);
        rows.insert(key, row);
    }

    rows
}

/// Pass-1 row backed by an existing billing record.
fn project_record(
    project_id: DbId,
    project_name: &str,
    subproject: &Subproject,
    resource: &Resource,
    record: &BillingRecord,
) -> ReconciledRow {
    ReconciledRow {
        project_id,
        subproject_id: subproject.id,
        resource_id: resource.id,
        project_name: project_name.to_string(),
        subproject_name: subproject.name.clone(),
        resource_name: resource.name.clone(),
        resource_role: resource.role.clone(),
        avatar_url: resource.avatar_url.clone(),
        billing_id: Some(record.id),
        hours: record.hours,
        rate: record.rate,
        flatrate: record
            .flatrate
            .or(resource.flatrate)
            .or(subproject.flatrate)
            .unwrap_or(0.0),
        productivity: record.productivity_level.clone(),
        description: record.description.clone().unwrap_or_default(),
        is_billable: record.billable_status == BillableStatus::Billable,
        is_editable: true,
    }
}

/// Pass-1 row with no backing record: zero hours at the Medium rate.
fn default_row(
    project_id: DbId,
    project_name: &str,
    subproject: &Subproject,
    resource: &Resource,
    rates: &RateTable,
) -> ReconciledRow {
    ReconciledRow {
        project_id,
        subproject_id: subproject.id,
        resource_id: resource.id,
        project_name: project_name.to_string(),
        subproject_name: subproject.name.clone(),
        resource_name: resource.name.clone(),
        resource_role: resource.role.clone(),
        avatar_url: resource.avatar_url.clone(),
        billing_id: None,
        hours: 0.0,
        rate: rates.default_rate(subproject.id),
        flatrate: resource.flatrate.or(subproject.flatrate).unwrap_or(0.0),
        productivity: ProductivityLevel::Medium.as_str().to_string(),
        description: String::new(),
        is_billable: true,
        is_editable: true,
    }
}

/// Pass-2 row: frozen history, with placeholder display fields when the
/// resource itself no longer exists.
fn historical_row(
    project_id: DbId,
    project_name: &str,
    subproject: &Subproject,
    reference: &ReferenceIndex,
    record: &BillingRecord,
) -> ReconciledRow {
    let (resource_name, resource_role, avatar_url) = match reference.resource(record.resource_id) {
        Some(resource) => (
            resource.name.clone(),
            resource.role.clone(),
            resource.avatar_url.clone(),
        ),
        None => (
            deleted_resource_name(record.resource_name.as_deref(), record.resource_id),
            "N/A".to_string(),
            Some(DELETED_RESOURCE_AVATAR.to_string()),
        ),
    };
    ReconciledRow {
        project_id,
        subproject_id: subproject.id,
        resource_id: record.resource_id,
        project_name: project_name.to_string(),
        subproject_name: subproject.name.clone(),
        resource_name,
        resource_role,
        avatar_url,
        billing_id: Some(record.id),
        hours: record.hours,
        rate: record.rate,
        flatrate: record.flatrate.unwrap_or(0.0),
        productivity: record.productivity_level.clone(),
        description: record.description.clone().unwrap_or_default(),
        is_billable: record.billable_status == BillableStatus::Billable,
        is_editable: false,
    }
}
