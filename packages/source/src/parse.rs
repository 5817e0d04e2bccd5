//! Typed parsing of the sheet's CSV export.
//!
//! The export carries the agency's original column headers. Beyond type
//! coercion (empty count cells read as zero, datetime cells truncated to
//! their date) no validation is applied; schema conformance is the
//! sheet's responsibility, and a row that cannot be coerced fails the
//! whole parse.

use chrono::{NaiveDate, NaiveDateTime};
use screwworm_map_surveillance_models::Observation;

use crate::SourceError;

/// Header of the municipality column.
pub const COL_MUNICIPALITY: &str = "Municipio_Yucatan";
/// Header of the report date column.
pub const COL_REPORT_DATE: &str = "Fecha_Reporte";
/// Header of the cumulative case count column.
pub const COL_CUMULATIVE: &str = "Casos_Acumulados";
/// Header of the weekly case count column.
pub const COL_WEEKLY: &str = "Casos_Semanales";

/// Parses the CSV export into observation rows.
///
/// Rows whose cells are all empty (trailing sheet padding) are skipped.
///
/// # Errors
///
/// Returns [`SourceError::MissingColumn`] if a required header is absent,
/// [`SourceError::InvalidDate`] or [`SourceError::InvalidCount`] if a
/// cell cannot be coerced.
pub fn parse_rows(data: &[u8]) -> Result<Vec<Observation>, SourceError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);

    let headers = reader.headers()?.clone();
    let municipality_idx = column_index(&headers, COL_MUNICIPALITY)?;
    let date_idx = column_index(&headers, COL_REPORT_DATE)?;
    let cumulative_idx = column_index(&headers, COL_CUMULATIVE)?;
    let weekly_idx = column_index(&headers, COL_WEEKLY)?;

    let mut rows = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let municipality = record.get(municipality_idx).unwrap_or("").trim().to_string();

        let date_cell = record.get(date_idx).unwrap_or("").trim();
        let report_date = parse_report_date(date_cell).ok_or_else(|| SourceError::InvalidDate {
            value: date_cell.to_string(),
            row,
        })?;

        let cumulative_cases = parse_count(record.get(cumulative_idx).unwrap_or(""), row)?;
        let weekly_cases = parse_count(record.get(weekly_idx).unwrap_or(""), row)?;

        rows.push(Observation::new(
            municipality,
            report_date,
            cumulative_cases,
            weekly_cases,
        ));
    }

    Ok(rows)
}

/// Finds a required column in the header record.
fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, SourceError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| SourceError::MissingColumn {
            column: name.to_string(),
        })
}

/// Parses a report date cell, discarding any time of day.
///
/// Accepts `YYYY-MM-DD`, `DD/MM/YYYY`, and the ISO datetime forms the
/// sheet export produces.
#[must_use]
pub fn parse_report_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%d/%m/%Y") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    None
}

/// Coerces a count cell: empty reads as zero, anything else must be a
/// non-negative integer.
fn parse_count(cell: &str, row: usize) -> Result<u64, SourceError> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| SourceError::InvalidCount {
        value: trimmed.to_string(),
        row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_CSV: &str = "\
Municipio_Yucatan,Fecha_Reporte,Casos_Acumulados,Casos_Semanales
TIZIMIN,2025-01-01,10,10
TIZIMIN,2025-01-08,15,5
PETO,2025-01-08,3,3
";

    #[test]
    fn parses_well_formed_export() {
        let rows = parse_rows(GOOD_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].municipality, "TIZIMIN");
        assert_eq!(rows[0].report_date, "2025-01-01".parse().unwrap());
        assert_eq!(rows[0].cumulative_cases, 10);
        assert_eq!(rows[2].weekly_cases, 3);
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "Municipio_Yucatan,Fecha_Reporte,Casos_Acumulados\nTIZIMIN,2025-01-01,10\n";
        let err = parse_rows(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            SourceError::MissingColumn { column } if column == COL_WEEKLY
        ));
    }

    #[test]
    fn unparseable_date_is_fatal() {
        let csv = "Municipio_Yucatan,Fecha_Reporte,Casos_Acumulados,Casos_Semanales\n\
                   TIZIMIN,next tuesday,10,1\n";
        let err = parse_rows(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SourceError::InvalidDate { row: 1, .. }));
    }

    #[test]
    fn unparseable_count_is_fatal() {
        let csv = "Municipio_Yucatan,Fecha_Reporte,Casos_Acumulados,Casos_Semanales\n\
                   TIZIMIN,2025-01-01,diez,1\n";
        let err = parse_rows(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SourceError::InvalidCount { row: 1, .. }));
    }

    #[test]
    fn empty_count_cells_coerce_to_zero() {
        let csv = "Municipio_Yucatan,Fecha_Reporte,Casos_Acumulados,Casos_Semanales\n\
                   TIZIMIN,2025-01-01,,\n";
        let rows = parse_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].cumulative_cases, 0);
        assert_eq!(rows[0].weekly_cases, 0);
    }

    #[test]
    fn blank_padding_rows_are_skipped() {
        let csv = "Municipio_Yucatan,Fecha_Reporte,Casos_Acumulados,Casos_Semanales\n\
                   TIZIMIN,2025-01-01,10,1\n\
                   ,,,\n";
        let rows = parse_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn accepts_every_date_form_the_export_produces() {
        assert_eq!(
            parse_report_date("2025-01-08"),
            Some("2025-01-08".parse().unwrap())
        );
        assert_eq!(
            parse_report_date("08/01/2025"),
            Some("2025-01-08".parse().unwrap())
        );
        assert_eq!(
            parse_report_date("2025-01-08T14:30:00"),
            Some("2025-01-08".parse().unwrap())
        );
        assert_eq!(
            parse_report_date("2025-01-08 14:30:00"),
            Some("2025-01-08".parse().unwrap())
        );
        assert_eq!(parse_report_date("not-a-date"), None);
    }
}
