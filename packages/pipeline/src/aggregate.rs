//! Aggregation engine: derives every dashboard view from a filtered set.
//!
//! All functions are pure and deterministic. Grouping preserves the
//! first-seen order of the input, and the ranking sort is stable, so
//! tied municipalities keep that order. Duplicate (municipality, date)
//! rows are consumed as-is: `max`-based aggregates are unaffected by
//! duplication, `sum`-based aggregates count duplicates as reported.

use std::collections::{BTreeMap, HashMap, HashSet};

use screwworm_map_pipeline_models::{
    CoverageSummary, FirstReportEntry, MapPoint, MetricsSummary, RankedMunicipality, WeeklyPoint,
};
use screwworm_map_surveillance_models::Observation;

/// Default number of municipalities in the ranking view.
pub const DEFAULT_TOP_N: usize = 10;

/// Computes the headline metrics for the filtered set.
///
/// `total_cases` is the maximum cumulative count across all rows, never
/// a sum, since each cumulative count already represents a running total.
/// `current_week_cases` sums weekly cases over rows at the latest report
/// date only. Empty input yields all-zero metrics with no date.
#[must_use]
pub fn metrics_summary(rows: &[Observation]) -> MetricsSummary {
    let latest_report = rows.iter().map(|o| o.report_date).max();

    let municipalities: HashSet<&str> = rows.iter().map(|o| o.municipality.as_str()).collect();

    let total_cases = rows.iter().map(|o| o.cumulative_cases).max().unwrap_or(0);

    let current_week_cases = latest_report.map_or(0, |latest| {
        rows.iter()
            .filter(|o| o.report_date == latest)
            .map(|o| o.weekly_cases)
            .sum()
    });

    MetricsSummary {
        municipality_count: municipalities.len() as u64,
        total_cases,
        current_week_cases,
        latest_report,
    }
}

/// Builds the per-municipality map dataset.
///
/// Groups by municipality in first-seen order, taking the peak cumulative
/// count and the weekly-case sum within the filtered window, and attaches
/// coordinates from the geography table (unknown names land on the
/// regional center).
#[must_use]
pub fn map_dataset(rows: &[Observation]) -> Vec<MapPoint> {
    let mut points: Vec<MapPoint> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for o in rows {
        if let Some(&i) = index.get(o.municipality.as_str()) {
            let point = &mut points[i];
            point.peak_cumulative = point.peak_cumulative.max(o.cumulative_cases);
            point.weekly_total += o.weekly_cases;
        } else {
            if !screwworm_map_geography::is_known(&o.municipality) {
                log::debug!(
                    "Municipality '{}' not in coordinate table; using regional center",
                    o.municipality
                );
            }
            let coords = screwworm_map_geography::lookup(&o.municipality);
            index.insert(o.municipality.as_str(), points.len());
            points.push(MapPoint {
                municipality: o.municipality.clone(),
                peak_cumulative: o.cumulative_cases,
                weekly_total: o.weekly_cases,
                lat: coords.lat,
                lon: coords.lon,
            });
        }
    }

    points
}

/// Ranks municipalities by peak cumulative cases, descending.
///
/// The sort is stable, so municipalities tied on case count keep their
/// first-seen order. For n < k, the first n entries of the k-ranking
/// equal the n-ranking (prefix consistency).
#[must_use]
pub fn top_municipalities(rows: &[Observation], n: usize) -> Vec<RankedMunicipality> {
    let mut ranked: Vec<RankedMunicipality> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for o in rows {
        if let Some(&i) = index.get(o.municipality.as_str()) {
            let entry = &mut ranked[i];
            entry.peak_cumulative = entry.peak_cumulative.max(o.cumulative_cases);
        } else {
            index.insert(o.municipality.as_str(), ranked.len());
            ranked.push(RankedMunicipality {
                municipality: o.municipality.clone(),
                peak_cumulative: o.cumulative_cases,
            });
        }
    }

    ranked.sort_by(|a, b| b.peak_cumulative.cmp(&a.peak_cumulative));
    ranked.truncate(n);
    ranked
}

/// Builds the statewide weekly time series in chronological order.
#[must_use]
pub fn weekly_series(rows: &[Observation]) -> Vec<WeeklyPoint> {
    let mut by_date: BTreeMap<chrono::NaiveDate, u64> = BTreeMap::new();

    for o in rows {
        *by_date.entry(o.report_date).or_insert(0) += o.weekly_cases;
    }

    by_date
        .into_iter()
        .map(|(report_date, weekly_cases)| WeeklyPoint {
            report_date,
            weekly_cases,
        })
        .collect()
}

/// Reconstructs the outbreak spread order: each municipality's earliest
/// report, chronologically.
///
/// Rows are stably sorted by date, then the first row per municipality is
/// kept; ties on date resolve to the original input order.
#[must_use]
pub fn first_report_timeline(rows: &[Observation]) -> Vec<FirstReportEntry> {
    let mut sorted: Vec<&Observation> = rows.iter().collect();
    sorted.sort_by_key(|o| o.report_date);

    let mut seen: HashSet<&str> = HashSet::new();
    let mut timeline = Vec::new();

    for o in sorted {
        if seen.insert(o.municipality.as_str()) {
            timeline.push(FirstReportEntry {
                municipality: o.municipality.clone(),
                report_date: o.report_date,
                weekly_cases: o.weekly_cases,
            });
        }
    }

    timeline
}

/// Derives outbreak coverage from the first-report timeline.
///
/// `total_municipalities` is the fixed regional constant; a zero total
/// yields a zero percentage rather than dividing by zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn coverage(timeline: &[FirstReportEntry], total_municipalities: u64) -> CoverageSummary {
    let affected_count = timeline.len() as u64;
    let affected_percent = if total_municipalities == 0 {
        0.0
    } else {
        affected_count as f64 / total_municipalities as f64 * 100.0
    };

    CoverageSummary {
        affected_count,
        total_municipalities,
        affected_percent,
        first_affected: timeline.first().cloned(),
        latest_affected: timeline.last().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::collections::HashSet;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn obs(municipality: &str, report_date: &str, cumulative: u64, weekly: u64) -> Observation {
        Observation::new(municipality.into(), date(report_date), cumulative, weekly)
    }

    /// The worked three-row scenario: two municipalities, two dates.
    fn scenario() -> Vec<Observation> {
        vec![
            obs("A", "2025-01-01", 10, 10),
            obs("A", "2025-01-08", 15, 5),
            obs("B", "2025-01-08", 3, 3),
        ]
    }

    #[test]
    fn metrics_for_scenario() {
        let metrics = metrics_summary(&scenario());
        assert_eq!(metrics.municipality_count, 2);
        assert_eq!(metrics.total_cases, 15);
        assert_eq!(metrics.current_week_cases, 8);
        assert_eq!(metrics.latest_report, Some(date("2025-01-08")));
    }

    #[test]
    fn metrics_for_empty_input_are_zero() {
        let metrics = metrics_summary(&[]);
        assert_eq!(metrics, MetricsSummary::default());
    }

    #[test]
    fn map_dataset_for_scenario() {
        let points = map_dataset(&scenario());
        assert_eq!(points.len(), 2);

        assert_eq!(points[0].municipality, "A");
        assert_eq!(points[0].peak_cumulative, 15);
        assert_eq!(points[0].weekly_total, 15);

        assert_eq!(points[1].municipality, "B");
        assert_eq!(points[1].peak_cumulative, 3);
        assert_eq!(points[1].weekly_total, 3);
    }

    #[test]
    fn map_dataset_peak_is_true_group_maximum() {
        let rows = vec![
            obs("TIZIMIN", "2025-01-01", 12, 2),
            obs("TIZIMIN", "2025-01-08", 9, 1),
            obs("TIZIMIN", "2025-01-15", 20, 8),
        ];
        let points = map_dataset(&rows);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].peak_cumulative, 20);
        assert_eq!(points[0].weekly_total, 11);
    }

    #[test]
    fn map_dataset_row_count_bounded_by_distinct_municipalities() {
        let rows = scenario();
        let distinct: HashSet<&str> = rows.iter().map(|o| o.municipality.as_str()).collect();
        assert!(map_dataset(&rows).len() <= distinct.len());
    }

    #[test]
    fn map_dataset_attaches_known_coordinates() {
        let rows = vec![obs("TIZIMIN", "2025-01-01", 5, 5)];
        let points = map_dataset(&rows);
        let expected = screwworm_map_geography::lookup("TIZIMIN");
        assert!((points[0].lat - expected.lat).abs() < f64::EPSILON);
        assert!((points[0].lon - expected.lon).abs() < f64::EPSILON);
    }

    #[test]
    fn ranking_is_descending_and_prefix_consistent() {
        let rows = vec![
            obs("A", "2025-01-01", 10, 1),
            obs("B", "2025-01-01", 30, 1),
            obs("C", "2025-01-01", 20, 1),
            obs("D", "2025-01-01", 5, 1),
        ];
        let top4 = top_municipalities(&rows, 4);
        assert!(top4.windows(2).all(|w| w[0].peak_cumulative >= w[1].peak_cumulative));

        for n in 1..4 {
            assert_eq!(top_municipalities(&rows, n), top4[..n].to_vec());
        }
    }

    #[test]
    fn ranking_ties_keep_first_seen_order() {
        let rows = vec![
            obs("B", "2025-01-01", 10, 1),
            obs("A", "2025-01-01", 10, 1),
            obs("C", "2025-01-01", 10, 1),
        ];
        let ranked = top_municipalities(&rows, 3);
        let names: Vec<&str> = ranked.iter().map(|r| r.municipality.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
    }

    #[test]
    fn weekly_series_preserves_every_case() {
        let rows = scenario();
        let series = weekly_series(&rows);
        let series_total: u64 = series.iter().map(|p| p.weekly_cases).sum();
        let input_total: u64 = rows.iter().map(|o| o.weekly_cases).sum();
        assert_eq!(series_total, input_total);
    }

    #[test]
    fn weekly_series_is_chronological() {
        let rows = vec![
            obs("A", "2025-01-15", 5, 5),
            obs("A", "2025-01-01", 2, 2),
            obs("B", "2025-01-08", 3, 3),
        ];
        let series = weekly_series(&rows);
        assert!(series.windows(2).all(|w| w[0].report_date < w[1].report_date));
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn timeline_for_scenario() {
        let timeline = first_report_timeline(&scenario());
        assert_eq!(timeline.len(), 2);

        assert_eq!(timeline[0].municipality, "A");
        assert_eq!(timeline[0].report_date, date("2025-01-01"));
        assert_eq!(timeline[0].weekly_cases, 10);

        assert_eq!(timeline[1].municipality, "B");
        assert_eq!(timeline[1].report_date, date("2025-01-08"));
        assert_eq!(timeline[1].weekly_cases, 3);
    }

    #[test]
    fn timeline_dates_are_group_minimums_in_order() {
        let rows = vec![
            obs("A", "2025-02-01", 9, 1),
            obs("B", "2025-01-08", 3, 3),
            obs("A", "2025-01-15", 7, 2),
            obs("C", "2025-01-01", 1, 1),
        ];
        let timeline = first_report_timeline(&rows);
        assert!(timeline.windows(2).all(|w| w[0].report_date <= w[1].report_date));

        for entry in &timeline {
            let min = rows
                .iter()
                .filter(|o| o.municipality == entry.municipality)
                .map(|o| o.report_date)
                .min()
                .unwrap();
            assert_eq!(entry.report_date, min);
        }
    }

    #[test]
    fn empty_input_gives_empty_aggregates() {
        assert!(map_dataset(&[]).is_empty());
        assert!(top_municipalities(&[], DEFAULT_TOP_N).is_empty());
        assert!(weekly_series(&[]).is_empty());
        assert!(first_report_timeline(&[]).is_empty());
    }

    #[test]
    fn coverage_from_timeline() {
        let timeline = first_report_timeline(&scenario());
        let summary = coverage(&timeline, 106);
        assert_eq!(summary.affected_count, 2);
        assert_eq!(summary.total_municipalities, 106);
        assert!((summary.affected_percent - 2.0 / 106.0 * 100.0).abs() < 1e-9);
        assert_eq!(summary.first_affected.as_ref().unwrap().municipality, "A");
        assert_eq!(summary.latest_affected.as_ref().unwrap().municipality, "B");
    }

    #[test]
    fn coverage_of_empty_timeline_is_zeroed() {
        let summary = coverage(&[], 106);
        assert_eq!(summary.affected_count, 0);
        assert!(summary.affected_percent.abs() < f64::EPSILON);
        assert!(summary.first_affected.is_none());
        assert!(summary.latest_affected.is_none());
    }
}
