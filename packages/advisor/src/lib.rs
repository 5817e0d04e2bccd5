#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canned analytical reports rendered from surveillance aggregates.
//!
//! Each report kind turns the current filtered data into a fixed-shape
//! Spanish markdown text: priority municipalities, weekly trend, resource
//! distribution tiers, recent-activity risk, and the agency's support
//! programs. These are deterministic renderings of pipeline aggregates;
//! no model call involved.

use std::fmt::Write as _;

use screwworm_map_pipeline::aggregate;
use screwworm_map_pipeline::analysis::{self, RECENT_WINDOW_DAYS};
use screwworm_map_pipeline_models::TrendDirection;
use screwworm_map_surveillance_models::Observation;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Text returned when a report is requested over an empty data set.
const NO_DATA: &str = "Sin datos de vigilancia disponibles.";

/// The report kinds the dashboard can request.
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
pub enum ReportKind {
    /// Municipalities concentrating the most cases.
    Priority,
    /// Direction of the weekly-case series.
    Trend,
    /// Resource distribution tiers across affected municipalities.
    Distribution,
    /// Municipalities with the most recent activity.
    Risk,
    /// The agency's support programs (static).
    Support,
}

/// Renders the requested report over the given (already filtered) rows.
#[must_use]
pub fn generate(kind: ReportKind, rows: &[Observation]) -> String {
    match kind {
        ReportKind::Priority => priority_report(rows),
        ReportKind::Trend => trend_report(rows),
        ReportKind::Distribution => distribution_report(rows),
        ReportKind::Risk => risk_report(rows),
        ReportKind::Support => support_report(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Municipalities that concentrate the most cumulative cases.
fn priority_report(rows: &[Observation]) -> String {
    if rows.is_empty() {
        return NO_DATA.to_string();
    }

    let total_cases = aggregate::metrics_summary(rows).total_cases;
    let top = aggregate::top_municipalities(rows, 5);

    let mut report = String::from(
        "**MUNICIPIOS QUE REQUIEREN ATENCIÓN PRIORITARIA:**\n\n\
         Los siguientes municipios concentran el mayor número de casos:\n\n",
    );

    for (i, entry) in top.iter().enumerate() {
        writeln!(
            report,
            "{}. **{}**: {} casos ({:.1}% del total)",
            i + 1,
            entry.municipality,
            entry.peak_cumulative,
            percent_of(entry.peak_cumulative, total_cases)
        )
        .unwrap();
    }

    report.push_str(
        "\n**RECOMENDACIONES:**\n\
         - Destinar el 60% de recursos a los 3 municipios principales\n\
         - Establecer puntos de verificación móviles en estas zonas\n\
         - Priorizar distribución de medicamentos para heridas\n\
         - Intensificar liberación de moscas estériles\n",
    );
    report
}

/// Direction of the weekly series over the trailing window.
fn trend_report(rows: &[Observation]) -> String {
    if rows.is_empty() {
        return NO_DATA.to_string();
    }

    let series = aggregate::weekly_series(rows);
    let trend = analysis::weekly_trend(&series);
    let current_week = series.last().map_or(0, |p| p.weekly_cases);

    let label = match trend.direction {
        TrendDirection::Rising => "aumentando",
        TrendDirection::Falling => "disminuyendo",
        TrendDirection::Stable => "estable",
    };

    let mut report = format!(
        "**ANÁLISIS DE TENDENCIA:**\n\n\
         La tendencia de casos está **{label}** con un cambio del \
         **{:.1}%** en las últimas {} semanas.\n\n\
         **Casos esta semana:** {current_week}\n\n\
         **INTERPRETACIÓN:**\n",
        trend.percent_change.abs(),
        trend.window,
    );

    if trend.direction == TrendDirection::Rising {
        report.push_str(
            "- ⚠️ **Alerta:** Se requiere intensificar medidas de control\n\
             - Aumentar frecuencia de inspecciones en zonas afectadas\n\
             - Reforzar campañas de capacitación a ganaderos\n\
             - Solicitar moscas estériles adicionales\n",
        );
    } else {
        report.push_str(
            "- ✅ **Positivo:** Las medidas de control están funcionando\n\
             - Mantener el nivel actual de recursos\n\
             - Continuar con monitoreo regular\n\
             - Prepararse para posibles rebrotes\n",
        );
    }
    report
}

/// Three-tier resource distribution across the top municipalities.
fn distribution_report(rows: &[Observation]) -> String {
    if rows.is_empty() {
        return NO_DATA.to_string();
    }

    let total_cases = aggregate::metrics_summary(rows).total_cases;
    let top10 = aggregate::top_municipalities(rows, 10);
    let top10_sum: u64 = top10.iter().map(|e| e.peak_cumulative).sum();

    let mut report = format!(
        "**ESTRATEGIA DE DISTRIBUCIÓN DE RECURSOS:**\n\n\
         Los {} municipios más afectados concentran el **{:.1}%** de los casos.\n\n\
         **PROPUESTA DE ASIGNACIÓN:**\n\n\
         **Nivel 1 - CRÍTICO (60% de recursos):**\n",
        top10.len(),
        percent_of(top10_sum, total_cases).min(100.0),
    );

    for entry in top10.iter().take(3) {
        writeln!(
            report,
            "- {}: {} casos",
            entry.municipality, entry.peak_cumulative
        )
        .unwrap();
    }

    report.push_str("\n**Nivel 2 - ALTO (30% de recursos):**\n");
    for entry in top10.iter().skip(3).take(4) {
        writeln!(
            report,
            "- {}: {} casos",
            entry.municipality, entry.peak_cumulative
        )
        .unwrap();
    }

    report.push_str(
        "\n**Nivel 3 - MODERADO (10% de recursos):**\n\
         - Resto de municipios afectados\n\
         - Enfoque en prevención y vigilancia\n",
    );
    report
}

/// Municipalities with the most activity in the last two weeks of data.
fn risk_report(rows: &[Observation]) -> String {
    if rows.is_empty() {
        return NO_DATA.to_string();
    }

    let recent = analysis::recent_activity(rows, RECENT_WINDOW_DAYS);
    let ranking = aggregate::top_municipalities(rows, rows.len());

    let mut report = String::from(
        "**EVALUACIÓN DE ZONAS DE RIESGO:**\n\n\
         **Municipios con Mayor Actividad (Últimas 2 semanas):**\n\n",
    );

    for (i, entry) in recent.iter().take(5).enumerate() {
        let total = ranking
            .iter()
            .find(|r| r.municipality == entry.municipality)
            .map_or(0, |r| r.peak_cumulative);
        writeln!(
            report,
            "{}. **{}**: {} casos nuevos (Total: {total})",
            i + 1,
            entry.municipality,
            entry.recent_cases
        )
        .unwrap();
    }

    report.push_str(
        "\n**FACTORES DE RIESGO:**\n\
         - Alta densidad de casos acumulados\n\
         - Casos nuevos en las últimas 2 semanas\n\
         - Proximidad a municipios afectados\n\n\
         **ACCIONES RECOMENDADAS:**\n\
         1. Establecer cercos epidemiológicos\n\
         2. Restringir movilización de ganado\n\
         3. Intensificar inspecciones en rutas ganaderas\n\
         4. Coordinar con municipios vecinos\n",
    );
    report
}

/// Static description of the agency's support programs.
fn support_report() -> String {
    "**APOYOS DISPONIBLES DE SENASICA:**\n\n\
     **1. Apoyos Inmediatos:**\n\
     - Medicamentos para heridas (gratuitos)\n\
     - Kits de recolección de muestras\n\
     - Atención veterinaria de emergencia (< 24 hrs)\n\n\
     **2. Capacitación:**\n\
     - Talleres gratuitos para identificación del gusano\n\
     - Técnicas de desinfección y curación de heridas\n\
     - Protocolos de bioseguridad\n\n\
     **3. Control Biológico:**\n\
     - Liberación de moscas estériles semanal\n\
     - Sin costo para los ganaderos\n\n\
     **4. Contacto de Emergencia:**\n\
     - Teléfono: 800-751-2100\n\n\
     **CÓMO SOLICITAR:**\n\
     Llamar inmediatamente al detectar gusaneras en heridas de animales. \
     La atención es en menos de 24 horas.\n"
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn obs(municipality: &str, report_date: &str, cumulative: u64, weekly: u64) -> Observation {
        Observation::new(municipality.into(), date(report_date), cumulative, weekly)
    }

    fn sample() -> Vec<Observation> {
        vec![
            obs("TIZIMIN", "2025-01-01", 10, 10),
            obs("TIZIMIN", "2025-01-08", 15, 5),
            obs("PETO", "2025-01-08", 3, 3),
        ]
    }

    #[test]
    fn report_kind_string_roundtrip() {
        for kind in [
            ReportKind::Priority,
            ReportKind::Trend,
            ReportKind::Distribution,
            ReportKind::Risk,
            ReportKind::Support,
        ] {
            assert_eq!(kind.to_string().parse::<ReportKind>().unwrap(), kind);
        }
    }

    #[test]
    fn priority_report_lists_top_municipalities_with_shares() {
        let report = generate(ReportKind::Priority, &sample());
        assert!(report.contains("1. **TIZIMIN**: 15 casos (100.0% del total)"));
        assert!(report.contains("2. **PETO**: 3 casos (20.0% del total)"));
        assert!(report.contains("RECOMENDACIONES"));
    }

    #[test]
    fn trend_report_names_current_week_cases() {
        let report = generate(ReportKind::Trend, &sample());
        // Two weekly points only: not enough history for a direction.
        assert!(report.contains("**estable**"));
        assert!(report.contains("**Casos esta semana:** 8"));
    }

    #[test]
    fn risk_report_pairs_recent_with_totals() {
        let report = generate(ReportKind::Risk, &sample());
        assert!(report.contains("**TIZIMIN**: 15 casos nuevos (Total: 15)"));
        assert!(report.contains("**PETO**: 3 casos nuevos (Total: 3)"));
    }

    #[test]
    fn distribution_report_tiers_the_top_municipalities() {
        let rows: Vec<Observation> = (0..12)
            .map(|i| obs(&format!("M{i:02}"), "2025-01-01", 100 - i, 1))
            .collect();
        let report = generate(ReportKind::Distribution, &rows);
        assert!(report.contains("Nivel 1 - CRÍTICO"));
        assert!(report.contains("- M00: 100 casos"));
        assert!(report.contains("Nivel 2 - ALTO"));
        assert!(report.contains("- M03: 97 casos"));
        assert!(!report.contains("- M07: 93 casos"));
    }

    #[test]
    fn empty_data_yields_the_no_data_text() {
        for kind in [
            ReportKind::Priority,
            ReportKind::Trend,
            ReportKind::Distribution,
            ReportKind::Risk,
        ] {
            assert_eq!(generate(kind, &[]), NO_DATA);
        }
    }

    #[test]
    fn support_report_is_static() {
        assert_eq!(
            generate(ReportKind::Support, &[]),
            generate(ReportKind::Support, &sample())
        );
    }
}
