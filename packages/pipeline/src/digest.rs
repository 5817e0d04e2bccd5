//! Context digest: the plain-text summary handed to the assistant.
//!
//! The digest is the entire data interface to the conversational
//! service; it carries no knowledge of prompts or token budgets. Given
//! the same observation set the output is byte-identical: the only date
//! inside is the data's own latest report date, never the wall clock, so
//! a "generated at" stamp is the caller's business.

use std::fmt::Write as _;

use chrono::Days;
use screwworm_map_surveillance_models::Observation;

use crate::aggregate;

/// Display format for report dates in user-facing text.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Number of municipalities listed in the digest.
const DIGEST_TOP_N: usize = 5;

/// Days before the latest report date counted as "the last week".
const DIGEST_WEEK_DAYS: u64 = 7;

/// Renders the current data as a compact Spanish digest.
///
/// Contains: affected municipality count, peak cumulative total, number
/// of reports within the last week of data, and the top municipalities
/// by peak cumulative cases. Empty input produces an explicit no-data
/// digest rather than an error.
#[must_use]
pub fn data_digest(rows: &[Observation]) -> String {
    let Some(latest) = rows.iter().map(|o| o.report_date).max() else {
        return "Sin datos de vigilancia disponibles.".to_string();
    };

    let metrics = aggregate::metrics_summary(rows);

    let week_cutoff = latest - Days::new(DIGEST_WEEK_DAYS);
    let reports_last_week = rows.iter().filter(|o| o.report_date >= week_cutoff).count();

    let mut digest = String::new();
    writeln!(
        digest,
        "DATOS ACTUALES DE YUCATÁN (actualizado: {}):",
        latest.format(DISPLAY_DATE_FORMAT)
    )
    .unwrap();
    writeln!(
        digest,
        "- Total de municipios afectados: {}",
        metrics.municipality_count
    )
    .unwrap();
    writeln!(
        digest,
        "- Total de casos acumulados: {}",
        metrics.total_cases
    )
    .unwrap();
    writeln!(digest, "- Reportes en la última semana: {reports_last_week}").unwrap();
    writeln!(digest).unwrap();
    writeln!(digest, "Top {DIGEST_TOP_N} municipios más afectados:").unwrap();

    for entry in aggregate::top_municipalities(rows, DIGEST_TOP_N) {
        writeln!(
            digest,
            "- {}: {} casos",
            entry.municipality, entry.peak_cumulative
        )
        .unwrap();
    }

    digest
}
