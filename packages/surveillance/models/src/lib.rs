#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Surveillance observation record and filter types.
//!
//! This crate defines the canonical typed record for one screwworm report
//! row, one (municipality, report date) pair, along with the filter
//! parameter types every downstream view is computed from. The data source
//! normalizes its raw sheet rows into these types; everything after that
//! point is strongly typed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel municipality name meaning "no municipality filter".
///
/// The dashboard's multi-select ships this value alongside real
/// municipality names, so it is part of the external filter contract.
pub const ALL_MUNICIPALITIES: &str = "Todos";

/// One reported data point for a municipality at a report date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Municipality name as reported by the source sheet.
    pub municipality: String,
    /// The week/period this report covers (calendar date, no time of day).
    pub report_date: NaiveDate,
    /// Running total of cases ever recorded in the municipality as of
    /// `report_date`. Non-decreasing per municipality, a property of the
    /// data source, consumed here but not enforced.
    pub cumulative_cases: u64,
    /// New cases attributed to this specific period.
    pub weekly_cases: u64,
}

impl Observation {
    /// Creates a new observation.
    #[must_use]
    pub const fn new(
        municipality: String,
        report_date: NaiveDate,
        cumulative_cases: u64,
        weekly_cases: u64,
    ) -> Self {
        Self {
            municipality,
            report_date,
            cumulative_cases,
            weekly_cases,
        }
    }
}

/// Which municipalities a filtered view includes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MunicipalitySelection {
    /// Every municipality passes (no filter).
    #[default]
    All,
    /// Only rows whose municipality name is in the list pass.
    Only(Vec<String>),
}

impl MunicipalitySelection {
    /// Builds a selection from the raw name list the filter widget sends.
    ///
    /// An empty list, or any list containing the [`ALL_MUNICIPALITIES`]
    /// sentinel, means no filter. Matching is by exact name; the sheet
    /// and the widget share the same spelling.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() || names.iter().any(|n| n == ALL_MUNICIPALITIES) {
            Self::All
        } else {
            Self::Only(names)
        }
    }

    /// Returns `true` if the given municipality passes this selection.
    #[must_use]
    pub fn matches(&self, municipality: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.iter().any(|n| n == municipality),
        }
    }
}

/// Filter parameters for one request/render cycle.
///
/// Date bounds are inclusive on both ends and compared on calendar date
/// only. A `None` bound leaves that side unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationFilter {
    /// Municipality selection.
    pub municipalities: MunicipalitySelection,
    /// Earliest report date to include (inclusive).
    pub from: Option<NaiveDate>,
    /// Latest report date to include (inclusive).
    pub to: Option<NaiveDate>,
}

impl ObservationFilter {
    /// Returns `true` if the observation passes both the municipality
    /// selection and the date bounds.
    #[must_use]
    pub fn matches(&self, observation: &Observation) -> bool {
        self.municipalities.matches(&observation.municipality)
            && self.from.is_none_or(|from| observation.report_date >= from)
            && self.to.is_none_or(|to| observation.report_date <= to)
    }
}
