//! View projection over a reconciled row set: search filter, non-billable
//! visibility toggle, single-key column sort, and period totals.
//!
//! Everything here is a pure derivation; totals are computed over the
//! full row set, not the filtered view.

use serde::Serialize;

use crate::reconcile::{ReconciledRow, RowSet};

/// Sortable columns of the billing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Project,
    Subproject,
    Resource,
    FlatRate,
    Productivity,
    Hours,
    Rate,
    /// Computed internal cost: hours x rate.
    Costing,
    /// Computed revenue: hours x flat rate.
    TotalBill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The active sort: one key plus a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Apply a column-header click: re-selecting the current ascending
    /// key flips to descending; anything else sorts ascending by the new
    /// key.
    pub fn request(current: Option<SortSpec>, key: SortKey) -> SortSpec {
        match current {
            Some(spec) if spec.key == key && spec.direction == SortDirection::Ascending => {
                SortSpec {
                    key,
                    direction: SortDirection::Descending,
                }
            }
            _ => SortSpec {
                key,
                direction: SortDirection::Ascending,
            },
        }
    }
}

/// Presentation state applied on top of the reconciled rows.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    /// Case-insensitive substring match on the resource name.
    pub search: String,
    /// When false, non-billable rows are hidden.
    pub show_non_billable: bool,
    pub sort: Option<SortSpec>,
}

impl ViewOptions {
    /// Default view: everything visible, no sort.
    pub fn all_visible() -> Self {
        Self {
            search: String::new(),
            show_non_billable: true,
            sort: None,
        }
    }

    fn matches(&self, row: &ReconciledRow) -> bool {
        if !self.show_non_billable && !row.is_billable {
            return false;
        }
        self.search.is_empty()
            || row
                .resource_name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }
}

/// Derive the visible, ordered rows for rendering.
pub fn project_rows<'a>(rows: &'a RowSet, options: &ViewOptions) -> Vec<&'a ReconciledRow> {
    let mut visible: Vec<&ReconciledRow> =
        rows.values().filter(|row| options.matches(row)).collect();
    if let Some(spec) = options.sort {
        visible.sort_by(|a, b| {
            let ordering = compare(a, b, spec.key);
            match spec.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
    visible
}

fn compare(a: &ReconciledRow, b: &ReconciledRow, key: SortKey) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    let numeric = |x: f64, y: f64| x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    match key {
        SortKey::Project => a.project_name.cmp(&b.project_name),
        SortKey::Subproject => a.subproject_name.cmp(&b.subproject_name),
        SortKey::Resource => a.resource_name.cmp(&b.resource_name),
        SortKey::FlatRate => numeric(a.flatrate, b.flatrate),
        SortKey::Productivity => a.productivity.cmp(&b.productivity),
        SortKey::Hours => numeric(a.hours, b.hours),
        SortKey::Rate => numeric(a.rate, b.rate),
        SortKey::Costing => numeric(a.costing(), b.costing()),
        SortKey::TotalBill => numeric(a.total_bill(), b.total_bill()),
    }
}

/// How the grand figure combines revenue and cost.
///
/// The two page variants of the original console disagreed; the engine is
/// parameterized instead of duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalsPolicy {
    /// Billing variant: grand = revenue + cost.
    CombinedTotal,
    /// Costing variant: grand = revenue - cost (profit / loss).
    ProfitLoss,
}

/// Period totals over the full reconciled row set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    /// Billable revenue: sum of hours x flat rate over billable rows.
    pub revenue: f64,
    /// Internal cost: sum of hours x cost rate over all rows.
    pub cost: f64,
    /// Combined figure per the active [`TotalsPolicy`].
    pub grand: f64,
}

pub fn totals(rows: &RowSet, policy: TotalsPolicy) -> Totals {
    let revenue: f64 = rows
        .values()
        .filter(|row| row.is_billable)
        .map(ReconciledRow::total_bill)
        .sum();
    let cost: f64 = rows.values().map(ReconciledRow::costing).sum();
    let grand = match policy {
        TotalsPolicy::CombinedTotal => revenue + cost,
        TotalsPolicy::ProfitLoss => revenue - cost,
    };
    Totals {
        revenue,
        cost,
        grand,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::ReconciledRow;
    use crate::types::DbId;

    fn row(
        subproject_id: DbId,
        resource_id: DbId,
        name: &str,
        hours: f64,
        rate: f64,
        flatrate: f64,
        billable: bool,
    ) -> ReconciledRow {
        ReconciledRow {
            project_id: 1,
            subproject_id,
            resource_id,
            project_name: "Apollo".into(),
            subproject_name: format!("SP{subproject_id}"),
            resource_name: name.into(),
            resource_role: "Engineer".into(),
            avatar_url: None,
            billing_id: Some(resource_id),
            hours,
            rate,
            flatrate,
            productivity: "Medium".into(),
            description: String::new(),
            is_billable: billable,
            is_editable: true,
        }
    }

    fn rows() -> RowSet {
        let mut set = RowSet::new();
        for r in [
            row(10, 1, "Alice", 10.0, 50.0, 100.0, true),
            row(10, 2, "Bob", 4.0, 80.0, 100.0, false),
            row(11, 3, "Carol", 2.0, 30.0, 120.0, true),
        ] {
            set.insert(r.key(), r);
        }
        set
    }

    // -- Filtering --

    #[test]
    fn search_is_case_insensitive_substring() {
        let set = rows();
        let mut options = ViewOptions::all_visible();
        options.search = "aLi".into();
        let visible = project_rows(&set, &options);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].resource_name, "Alice");
    }

    #[test]
    fn non_billable_rows_hidden_when_toggled_off() {
        let set = rows();
        let mut options = ViewOptions::all_visible();
        options.show_non_billable = false;
        let visible = project_rows(&set, &options);
        assert!(visible.iter().all(|r| r.is_billable));
        assert_eq!(visible.len(), 2);
    }

    // -- Sorting --

    #[test]
    fn sort_by_hours_descending() {
        let set = rows();
        let mut options = ViewOptions::all_visible();
        options.sort = Some(SortSpec {
            key: SortKey::Hours,
            direction: SortDirection::Descending,
        });
        let visible = project_rows(&set, &options);
        let hours: Vec<f64> = visible.iter().map(|r| r.hours).collect();
        assert_eq!(hours, vec![10.0, 4.0, 2.0]);
    }

    #[test]
    fn sort_by_computed_costing() {
        // Costing: Alice 500, Bob 320, Carol 60.
        let set = rows();
        let mut options = ViewOptions::all_visible();
        options.sort = Some(SortSpec {
            key: SortKey::Costing,
            direction: SortDirection::Ascending,
        });
        let visible = project_rows(&set, &options);
        let names: Vec<&str> = visible.iter().map(|r| r.resource_name.as_str()).collect();
        assert_eq!(names, vec!["Carol", "Bob", "Alice"]);
    }

    #[test]
    fn requesting_same_key_flips_direction() {
        let first = SortSpec::request(None, SortKey::Hours);
        assert_eq!(first.direction, SortDirection::Ascending);

        let second = SortSpec::request(Some(first), SortKey::Hours);
        assert_eq!(second.direction, SortDirection::Descending);

        // A third click starts over ascending.
        let third = SortSpec::request(Some(second), SortKey::Hours);
        assert_eq!(third.direction, SortDirection::Ascending);
    }

    #[test]
    fn requesting_new_key_resets_to_ascending() {
        let current = SortSpec {
            key: SortKey::Hours,
            direction: SortDirection::Descending,
        };
        let next = SortSpec::request(Some(current), SortKey::Rate);
        assert_eq!(next.key, SortKey::Rate);
        assert_eq!(next.direction, SortDirection::Ascending);
    }

    // -- Totals --

    #[test]
    fn revenue_counts_only_billable_rows() {
        // Alice 10x100 + Carol 2x120 = 1240; Bob is non-billable.
        let set = rows();
        let t = totals(&set, TotalsPolicy::ProfitLoss);
        assert_eq!(t.revenue, 1240.0);
    }

    #[test]
    fn cost_counts_all_rows() {
        // 10x50 + 4x80 + 2x30 = 880.
        let set = rows();
        let t = totals(&set, TotalsPolicy::ProfitLoss);
        assert_eq!(t.cost, 880.0);
    }

    #[test]
    fn grand_figure_follows_policy() {
        let set = rows();
        assert_eq!(totals(&set, TotalsPolicy::ProfitLoss).grand, 1240.0 - 880.0);
        assert_eq!(
            totals(&set, TotalsPolicy::CombinedTotal).grand,
            1240.0 + 880.0
        );
    }

    #[test]
    fn totals_ignore_view_filters() {
        let set = rows();
        // Filters only shape the visible rows, not the totals.
        let mut options = ViewOptions::all_visible();
        options.show_non_billable = false;
        let _ = project_rows(&set, &options);
        assert_eq!(totals(&set, TotalsPolicy::ProfitLoss).cost, 880.0);
    }
}
