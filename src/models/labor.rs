//! Labor (manpower) allocation line items
//!
//! Each row of a manpower plan allocates one person (company staff or an
//! outsourced contractor) to the project for a number of person-months per
//! calendar month, priced twice: at the proposed billing rate and at the
//! internal cost rate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::numeric::{
    lenient_mm_map, lenient_option_amount, round_to_unit, sum_monthly,
};

/// Affiliation prefixes that mark a row as outsourced
const EXTERNAL_AFFILIATION_PREFIXES: [&str; 3] = ["외주", "External", "Outsourc"];

/// Who supplies the person on a labor row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LaborCategory {
    /// Own-company staff
    #[default]
    Company,
    /// Outsourced / external contractor
    External,
}

impl LaborCategory {
    /// Classify a free-text affiliation label ("외주 개발", "External QA", ...)
    pub fn from_affiliation(affiliation: &str) -> Self {
        let label = affiliation.trim();
        if EXTERNAL_AFFILIATION_PREFIXES
            .iter()
            .any(|prefix| label.starts_with(prefix))
        {
            Self::External
        } else {
            Self::Company
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External)
    }
}

impl fmt::Display for LaborCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaborCategory::Company => write!(f, "Company"),
            LaborCategory::External => write!(f, "External"),
        }
    }
}

/// One person's allocation to the project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LaborAllocationItem {
    /// Internal staff or outsourced; classified from `affiliation` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<LaborCategory>,

    /// Affiliation label from the manpower plan ("당사 기술직", "외주 개발")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub affiliation: String,

    /// Work area / role description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,

    /// Person's name, if already assigned
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Grade used to look up unit prices
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub grade: String,

    /// Person-months per calendar month ("2025-01" → 0.5)
    #[serde(default, deserialize_with = "lenient_mm_map")]
    pub monthly_allocation: BTreeMap<String, f64>,

    /// Billing unit price per person-month
    #[serde(default, deserialize_with = "lenient_option_amount")]
    pub proposed_unit_price: Option<f64>,

    /// Explicit billing total; wins over unit price × person-months
    #[serde(default, deserialize_with = "lenient_option_amount")]
    pub proposed_amount: Option<f64>,

    /// Internal cost unit price per person-month
    #[serde(default, deserialize_with = "lenient_option_amount")]
    pub internal_unit_price: Option<f64>,

    /// Explicit internal cost total; wins over unit price × person-months
    #[serde(default, deserialize_with = "lenient_option_amount")]
    pub internal_amount: Option<f64>,
}

impl LaborAllocationItem {
    /// Create a row with no allocation and no prices
    pub fn new(category: LaborCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    /// Create a row classified only by its affiliation label
    pub fn with_affiliation(affiliation: impl Into<String>) -> Self {
        Self {
            affiliation: affiliation.into(),
            ..Self::default()
        }
    }

    /// Explicit category, else the one implied by the affiliation label
    pub fn category(&self) -> LaborCategory {
        self.category
            .unwrap_or_else(|| LaborCategory::from_affiliation(&self.affiliation))
    }

    /// Allocate person-months for a month (builder style)
    pub fn with_month(mut self, month: impl Into<String>, mm: f64) -> Self {
        self.monthly_allocation.insert(month.into(), mm);
        self
    }

    /// Set both unit prices (builder style)
    pub fn with_unit_prices(mut self, proposed: f64, internal: f64) -> Self {
        self.proposed_unit_price = Some(proposed);
        self.internal_unit_price = Some(internal);
        self
    }

    /// Total person-months across all months
    pub fn total_mm(&self) -> f64 {
        sum_monthly(&self.monthly_allocation)
    }

    /// Billing amount: the explicit override, else unit price × person-months
    pub fn proposed_total(&self) -> f64 {
        resolve_amount(self.proposed_amount, self.proposed_unit_price, self.total_mm())
    }

    /// Internal cost amount: the explicit override, else unit price × person-months
    pub fn internal_total(&self) -> f64 {
        resolve_amount(self.internal_amount, self.internal_unit_price, self.total_mm())
    }
}

fn resolve_amount(explicit: Option<f64>, unit_price: Option<f64>, mm: f64) -> f64 {
    match explicit {
        Some(amount) => amount,
        None => round_to_unit(mm * unit_price.unwrap_or(0.0)),
    }
}
