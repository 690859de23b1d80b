//! Billing records and the period/template merge.
//!
//! A record with `month = None` is a template: a seed row not yet tied to
//! a billing period. When both a period-specific record and a template
//! exist for the same (subproject, resource) pair, the period-specific
//! one always shadows the template.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Whether a record's hours are charged to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillableStatus {
    Billable,
    #[serde(rename = "Non-Billable")]
    NonBillable,
}

/// Dedup key for billing rows: one live figure per (subproject, resource).
pub type BillingKey = (DbId, DbId);

/// A persisted billing entry, the central mutable entity.
///
/// `resource_id` may reference a resource that has since been deleted;
/// `resource_name` is the denormalized snapshot retained for that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingRecord {
    pub id: DbId,
    pub project_id: DbId,
    pub subproject_id: DbId,
    pub resource_id: DbId,
    #[serde(default)]
    pub resource_name: Option<String>,
    pub hours: f64,
    pub productivity_level: String,
    /// Internal cost rate resolved from the productivity table at entry
    /// time unless overridden.
    pub rate: f64,
    /// Revenue rate snapshotted from the subproject.
    #[serde(default)]
    pub flatrate: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    pub billable_status: BillableStatus,
    /// 1-12, or `None` for an unassigned template row.
    pub month: Option<u32>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub created_on: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl BillingRecord {
    pub fn key(&self) -> BillingKey {
        (self.subproject_id, self.resource_id)
    }

    /// Template rows carry no month and act only as defaults.
    pub fn is_template(&self) -> bool {
        self.month.is_none()
    }
}

/// Billing records deduplicated by (subproject, resource), with
/// period-specific records shadowing null-month templates.
#[derive(Debug, Clone, Default)]
pub struct MergedBilling {
    records: HashMap<BillingKey, BillingRecord>,
}

impl MergedBilling {
    /// Merge a period fetch and a template fetch.
    ///
    /// Period records are inserted first and always win; templates only
    /// fill keys with no period-specific entry.
    pub fn merge(period: Vec<BillingRecord>, templates: Vec<BillingRecord>) -> Self {
        let mut records = HashMap::new();
        for record in period {
            records.insert(record.key(), record);
        }
        for record in templates {
            records.entry(record.key()).or_insert(record);
        }
        Self { records }
    }

    pub fn get(&self, key: BillingKey) -> Option<&BillingRecord> {
        self.records.get(&key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BillingKey, &BillingRecord)> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn record(
        id: DbId,
        subproject_id: DbId,
        resource_id: DbId,
        month: Option<u32>,
        hours: f64,
    ) -> BillingRecord {
        BillingRecord {
            id,
            project_id: 1,
            subproject_id,
            resource_id,
            resource_name: None,
            hours,
            productivity_level: "Medium".into(),
            rate: 50.0,
            flatrate: Some(100.0),
            description: None,
            billable_status: BillableStatus::Billable,
            month,
            year: month.map(|_| 2025),
            created_on: None,
            updated_at: None,
        }
    }

    #[test]
    fn billable_status_wire_names() {
        assert_eq!(
            serde_json::to_value(BillableStatus::Billable).unwrap(),
            serde_json::json!("Billable")
        );
        assert_eq!(
            serde_json::to_value(BillableStatus::NonBillable).unwrap(),
            serde_json::json!("Non-Billable")
        );
    }

    #[test]
    fn template_detection() {
        assert!(record(1, 10, 100, None, 0.0).is_template());
        assert!(!record(2, 10, 100, Some(6), 5.0).is_template());
    }

    #[test]
    fn period_record_shadows_template() {
        let merged = MergedBilling::merge(
            vec![record(1, 10, 100, Some(6), 10.0)],
            vec![record(2, 10, 100, None, 0.0)],
        );
        assert_eq!(merged.len(), 1);
        let kept = merged.get((10, 100)).unwrap();
        assert_eq!(kept.id, 1);
        assert_eq!(kept.hours, 10.0);
    }

    #[test]
    fn template_fills_gap_when_no_period_record() {
        let merged = MergedBilling::merge(
            vec![record(1, 10, 100, Some(6), 10.0)],
            vec![record(2, 10, 101, None, 0.0)],
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get((10, 101)).unwrap().id, 2);
    }

    #[test]
    fn records_dedupe_by_subproject_and_resource() {
        let merged = MergedBilling::merge(
            vec![
                record(1, 10, 100, Some(6), 10.0),
                record(2, 11, 100, Some(6), 4.0),
            ],
            vec![],
        );
        assert_eq!(merged.len(), 2);
    }
}
