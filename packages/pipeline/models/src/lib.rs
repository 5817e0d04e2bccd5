#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregate product types for the surveillance pipeline.
//!
//! Every dashboard view and the assistant's context digest are computed
//! from these derived, ephemeral structures. They are serialized to JSON
//! for the REST API and carry no widget-specific shape; any chart or
//! table renderer can consume them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Headline metrics for the current filtered view.
///
/// `total_cases` is the *maximum* cumulative count across the filtered
/// rows, not a sum: each cumulative count is already a running total, so
/// adding them across dates or municipalities would double-count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    /// Number of distinct municipalities present.
    pub municipality_count: u64,
    /// Peak cumulative case count across all rows.
    pub total_cases: u64,
    /// Sum of weekly cases over rows at the latest report date.
    pub current_week_cases: u64,
    /// The latest report date, `None` when there is no data.
    pub latest_report: Option<NaiveDate>,
}

/// One municipality's aggregated position on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    /// Municipality name as reported.
    pub municipality: String,
    /// Peak cumulative cases within the filtered window.
    pub peak_cumulative: u64,
    /// Total new cases within the filtered window.
    pub weekly_total: u64,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

/// One entry in the top-N ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMunicipality {
    /// Municipality name.
    pub municipality: String,
    /// Peak cumulative cases within the filtered window.
    pub peak_cumulative: u64,
}

/// One point of the statewide weekly time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPoint {
    /// Report date.
    pub report_date: NaiveDate,
    /// Weekly cases summed across municipalities.
    pub weekly_cases: u64,
}

/// A municipality's first appearance in the filtered data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstReportEntry {
    /// Municipality name.
    pub municipality: String,
    /// Earliest report date present for this municipality.
    pub report_date: NaiveDate,
    /// Weekly cases reported on that first date.
    pub weekly_cases: u64,
}

/// How far the outbreak has spread across the region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSummary {
    /// Number of municipalities with at least one report.
    pub affected_count: u64,
    /// Fixed total number of municipalities in the region.
    pub total_municipalities: u64,
    /// `affected_count` as a percentage of the regional total.
    pub affected_percent: f64,
    /// First municipality to report, with its date.
    pub first_affected: Option<FirstReportEntry>,
    /// Most recent municipality to first report, with its date.
    pub latest_affected: Option<FirstReportEntry>,
}

/// Direction of the recent weekly-case trend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrendDirection {
    /// Weekly cases are increasing over the window.
    Rising,
    /// Weekly cases are decreasing over the window.
    Falling,
    /// Not enough data, or no change.
    Stable,
}

/// Trend of weekly cases over a trailing window of report dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTrend {
    /// Overall direction across the window.
    pub direction: TrendDirection,
    /// Percent change from the first to the last point of the window.
    /// Zero when the window's first point is zero.
    pub percent_change: f64,
    /// Number of weekly points the trend was computed over.
    pub window: usize,
}

/// Recent case activity for one municipality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    /// Municipality name.
    pub municipality: String,
    /// Weekly cases summed over the trailing window.
    pub recent_cases: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_direction_string_roundtrip() {
        for direction in [
            TrendDirection::Rising,
            TrendDirection::Falling,
            TrendDirection::Stable,
        ] {
            let s = direction.to_string();
            assert_eq!(s.parse::<TrendDirection>().unwrap(), direction);
        }
    }

    #[test]
    fn empty_metrics_default_to_zero_with_no_date() {
        let metrics = MetricsSummary::default();
        assert_eq!(metrics.municipality_count, 0);
        assert_eq!(metrics.total_cases, 0);
        assert_eq!(metrics.current_week_cases, 0);
        assert_eq!(metrics.latest_report, None);
    }
}
