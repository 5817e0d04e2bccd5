#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the surveillance server.
//!
//! These types are serialized to JSON for the REST API. The aggregate
//! bodies themselves come from the pipeline models crate; this crate adds
//! the query-parameter and assistant envelope types around them.

use chrono::NaiveDate;
use screwworm_map_advisor::ReportKind;
use screwworm_map_pipeline_models::{
    CoverageSummary, FirstReportEntry, MapPoint, MetricsSummary, RankedMunicipality, WeeklyPoint,
    WeeklyTrend,
};
use screwworm_map_surveillance_models::{MunicipalitySelection, ObservationFilter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Shared filter query parameters accepted by every aggregate endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQueryParams {
    /// Comma-separated municipality names; absent, empty, or containing
    /// the `Todos` sentinel means no filter.
    pub municipalities: Option<String>,
    /// Earliest report date to include (inclusive, ISO 8601).
    pub from: Option<NaiveDate>,
    /// Latest report date to include (inclusive, ISO 8601).
    pub to: Option<NaiveDate>,
}

impl FilterQueryParams {
    /// Converts the raw query parameters into a typed filter.
    #[must_use]
    pub fn to_filter(&self) -> ObservationFilter {
        let names: Vec<String> = self
            .municipalities
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();

        ObservationFilter {
            municipalities: MunicipalitySelection::from_names(names),
            from: self.from,
            to: self.to,
        }
    }
}

/// Extra query parameters for the rankings endpoint. Extracted alongside
/// [`FilterQueryParams`], since query-string deserialization does not compose
/// through `serde(flatten)`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingQueryParams {
    /// Number of municipalities to return (default 10).
    pub n: Option<usize>,
}

/// Extra query parameters for the recommendations endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationQueryParams {
    /// Which report to render.
    pub kind: ReportKind,
}

/// Every aggregate product in one response, one fetch per render cycle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    /// Headline metrics.
    pub metrics: MetricsSummary,
    /// Per-municipality map dataset.
    pub map_points: Vec<MapPoint>,
    /// Top municipalities by peak cumulative cases.
    pub rankings: Vec<RankedMunicipality>,
    /// Statewide weekly time series.
    pub weekly_series: Vec<WeeklyPoint>,
    /// First-report timeline (outbreak spread order).
    pub timeline: Vec<FirstReportEntry>,
    /// Regional coverage summary.
    pub coverage: CoverageSummary,
    /// Trailing weekly trend.
    pub trend: WeeklyTrend,
}

/// Request body for the assistant ask endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    /// Existing session to continue; a new session is created if absent.
    pub session_id: Option<Uuid>,
    /// The user's question, forwarded to the model unmodified.
    pub question: String,
}

/// Response body for the assistant ask endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    /// The session this turn was recorded under.
    pub session_id: Uuid,
    /// The assistant's markdown answer.
    pub answer: String,
}

/// Request body for the assistant clear endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearRequest {
    /// Session to drop.
    pub session_id: Uuid,
}

/// Response body for the assistant clear endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    /// Whether the session existed.
    pub cleared: bool,
}

/// Query parameters for the assistant transcript endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptQueryParams {
    /// Session to export.
    pub session_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_municipalities_select_all() {
        let params = FilterQueryParams::default();
        let filter = params.to_filter();
        assert_eq!(filter.municipalities, MunicipalitySelection::All);
        assert_eq!(filter.from, None);
        assert_eq!(filter.to, None);
    }

    #[test]
    fn comma_list_parses_with_trimming() {
        let params = FilterQueryParams {
            municipalities: Some("TIZIMIN, PETO ,".to_string()),
            from: None,
            to: None,
        };
        let filter = params.to_filter();
        assert_eq!(
            filter.municipalities,
            MunicipalitySelection::Only(vec!["TIZIMIN".to_string(), "PETO".to_string()])
        );
    }

    #[test]
    fn sentinel_in_list_selects_all() {
        let params = FilterQueryParams {
            municipalities: Some("Todos,TIZIMIN".to_string()),
            from: None,
            to: None,
        };
        assert_eq!(params.to_filter().municipalities, MunicipalitySelection::All);
    }

    #[test]
    fn empty_string_selects_all() {
        let params = FilterQueryParams {
            municipalities: Some(String::new()),
            from: None,
            to: None,
        };
        assert_eq!(params.to_filter().municipalities, MunicipalitySelection::All);
    }
}
