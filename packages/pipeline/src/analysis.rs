//! Trend and recent-activity analysis over the aggregated series.
//!
//! These feed the advisor reports and the assistant context: a trailing
//! trend over the weekly series, and per-municipality activity within the
//! last two weeks of data.

use std::collections::HashMap;

use chrono::Days;
use screwworm_map_pipeline_models::{RecentActivity, TrendDirection, WeeklyPoint, WeeklyTrend};
use screwworm_map_surveillance_models::Observation;

/// Number of trailing weekly points the trend is computed over.
pub const TREND_WINDOW: usize = 4;

/// Trailing window, in days off the latest report date, considered
/// "recent" for the risk view.
pub const RECENT_WINDOW_DAYS: u64 = 14;

/// Computes the weekly-case trend over the trailing [`TREND_WINDOW`].
///
/// With fewer points than the window the trend is reported stable with
/// zero change; there is not enough history to call a direction. The
/// percent change compares the window's last point against its first,
/// and is zero when the first point is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn weekly_trend(series: &[WeeklyPoint]) -> WeeklyTrend {
    if series.len() < TREND_WINDOW {
        return WeeklyTrend {
            direction: TrendDirection::Stable,
            percent_change: 0.0,
            window: series.len(),
        };
    }

    let tail = &series[series.len() - TREND_WINDOW..];
    let first = tail[0].weekly_cases;
    let last = tail[TREND_WINDOW - 1].weekly_cases;

    let direction = match last.cmp(&first) {
        std::cmp::Ordering::Greater => TrendDirection::Rising,
        std::cmp::Ordering::Less => TrendDirection::Falling,
        std::cmp::Ordering::Equal => TrendDirection::Stable,
    };

    let percent_change = if first == 0 {
        0.0
    } else {
        (last as f64 - first as f64) / first as f64 * 100.0
    };

    WeeklyTrend {
        direction,
        percent_change,
        window: TREND_WINDOW,
    }
}

/// Sums weekly cases per municipality over the trailing `days` window off
/// the latest report date, descending by recent cases.
///
/// Municipalities without a row inside the window are absent. Ties keep
/// first-seen order (stable sort). Empty input yields an empty list.
#[must_use]
pub fn recent_activity(rows: &[Observation], days: u64) -> Vec<RecentActivity> {
    let Some(latest) = rows.iter().map(|o| o.report_date).max() else {
        return Vec::new();
    };
    let cutoff = latest - Days::new(days);

    let mut activity: Vec<RecentActivity> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for o in rows.iter().filter(|o| o.report_date >= cutoff) {
        if let Some(&i) = index.get(o.municipality.as_str()) {
            activity[i].recent_cases += o.weekly_cases;
        } else {
            index.insert(o.municipality.as_str(), activity.len());
            activity.push(RecentActivity {
                municipality: o.municipality.clone(),
                recent_cases: o.weekly_cases,
            });
        }
    }

    activity.sort_by(|a, b| b.recent_cases.cmp(&a.recent_cases));
    activity
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn point(report_date: &str, weekly_cases: u64) -> WeeklyPoint {
        WeeklyPoint {
            report_date: date(report_date),
            weekly_cases,
        }
    }

    #[test]
    fn short_series_is_stable() {
        let series = vec![point("2025-01-01", 5), point("2025-01-08", 9)];
        let trend = weekly_trend(&series);
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert!(trend.percent_change.abs() < f64::EPSILON);
        assert_eq!(trend.window, 2);
    }

    #[test]
    fn rising_trend_over_last_four_points() {
        let series = vec![
            point("2025-01-01", 50),
            point("2025-01-08", 4),
            point("2025-01-15", 6),
            point("2025-01-22", 7),
            point("2025-01-29", 8),
        ];
        let trend = weekly_trend(&series);
        assert_eq!(trend.direction, TrendDirection::Rising);
        assert!((trend.percent_change - 100.0).abs() < 1e-9);
        assert_eq!(trend.window, TREND_WINDOW);
    }

    #[test]
    fn falling_trend_reports_negative_change() {
        let series = vec![
            point("2025-01-01", 10),
            point("2025-01-08", 8),
            point("2025-01-15", 6),
            point("2025-01-22", 5),
        ];
        let trend = weekly_trend(&series);
        assert_eq!(trend.direction, TrendDirection::Falling);
        assert!((trend.percent_change - -50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_start_avoids_division() {
        let series = vec![
            point("2025-01-01", 0),
            point("2025-01-08", 2),
            point("2025-01-15", 3),
            point("2025-01-22", 4),
        ];
        let trend = weekly_trend(&series);
        assert_eq!(trend.direction, TrendDirection::Rising);
        assert!(trend.percent_change.abs() < f64::EPSILON);
    }

    #[test]
    fn recent_activity_windows_off_latest_date() {
        let rows = vec![
            Observation::new("OLD".into(), date("2025-01-01"), 5, 5),
            Observation::new("A".into(), date("2025-02-01"), 10, 4),
            Observation::new("B".into(), date("2025-02-08"), 20, 9),
            Observation::new("A".into(), date("2025-02-08"), 12, 2),
        ];
        let activity = recent_activity(&rows, RECENT_WINDOW_DAYS);
        assert_eq!(activity.len(), 2);
        assert_eq!(activity[0].municipality, "B");
        assert_eq!(activity[0].recent_cases, 9);
        assert_eq!(activity[1].municipality, "A");
        assert_eq!(activity[1].recent_cases, 6);
    }

    #[test]
    fn recent_activity_of_empty_input_is_empty() {
        assert!(recent_activity(&[], RECENT_WINDOW_DAYS).is_empty());
    }
}
