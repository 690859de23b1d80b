//! Productivity levels and per-subproject internal cost rate tables.
//!
//! Each subproject configures at most one base rate per productivity
//! level. Level strings are matched case-insensitively because older
//! records store them with inconsistent casing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Internal cost rate tier for a resource's work on a subproject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductivityLevel {
    Low,
    Medium,
    High,
    Best,
}

impl ProductivityLevel {
    /// Canonical display string, as stored on billing records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Best => "Best",
        }
    }

    /// Case-insensitive parse. Returns `None` for unknown levels.
    pub fn parse_loose(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "best" => Some(Self::Best),
            _ => None,
        }
    }
}

impl Default for ProductivityLevel {
    /// `Medium` is the system-wide default when no level is specified.
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for ProductivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configured rate, as returned by `GET /productivity?subproject_id=`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductivityRate {
    /// Level name as stored; matched case-insensitively.
    pub level: String,
    pub base_rate: f64,
}

/// Rate lists keyed by subproject id.
///
/// A subproject with no configured rates yields an empty list, and any
/// lookup against it resolves to rate 0.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<DbId, Vec<ProductivityRate>>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the configured rates for one subproject, replacing any
    /// previously registered list.
    pub fn insert(&mut self, subproject_id: DbId, rates: Vec<ProductivityRate>) {
        self.rates.insert(subproject_id, rates);
    }

    /// The configured rates for a subproject, empty when unconfigured.
    pub fn rates_for(&self, subproject_id: DbId) -> &[ProductivityRate] {
        self.rates
            .get(&subproject_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve the base rate for a level by case-insensitive name match.
    pub fn rate_for(&self, subproject_id: DbId, level: &str) -> Option<f64> {
        self.rates_for(subproject_id)
            .iter()
            .find(|r| r.level.eq_ignore_ascii_case(level))
            .map(|r| r.base_rate)
    }

    /// Base rate for a level, defaulting to 0 when the subproject has no
    /// matching configuration.
    pub fn rate_or_zero(&self, subproject_id: DbId, level: &str) -> f64 {
        self.rate_for(subproject_id, level).unwrap_or(0.0)
    }

    /// Default-row rate: the `Medium` base rate, or 0 when unconfigured.
    pub fn default_rate(&self, subproject_id: DbId) -> f64 {
        self.rate_or_zero(subproject_id, ProductivityLevel::Medium.as_str())
    }
}
