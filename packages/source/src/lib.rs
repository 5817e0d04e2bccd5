#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Published-sheet observation source with typed parsing and caching.
//!
//! The agency maintains its weekly report sheet externally; this crate
//! consumes the sheet's published CSV export and turns it into typed
//! [`Observation`](screwworm_map_surveillance_models::Observation) rows.
//! A malformed export (missing column, unparseable date or count) is a
//! fatal error for the fetch: partial or garbage data never reaches the
//! pipeline. Fetches are fronted by a time-boxed snapshot cache so a
//! render cycle never waits on the network more than once per TTL.

pub mod cache;
pub mod parse;
pub mod sheet;

use screwworm_map_surveillance_models::Observation;
use thiserror::Error;

pub use cache::{CachedSource, DEFAULT_CACHE_TTL};
pub use sheet::SheetSource;

/// Errors from fetching or decoding the observation sheet.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP download of the sheet export failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The export could not be read as CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from the export header.
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// The column name that was not found.
        column: String,
    },

    /// A date cell could not be parsed in any accepted format.
    #[error("Invalid report date '{value}' in row {row}")]
    InvalidDate {
        /// The offending cell text.
        value: String,
        /// 1-based data row number (excluding the header).
        row: usize,
    },

    /// A case-count cell could not be parsed as a non-negative integer.
    #[error("Invalid case count '{value}' in row {row}")]
    InvalidCount {
        /// The offending cell text.
        value: String,
        /// 1-based data row number (excluding the header).
        row: usize,
    },
}

/// A source of observation rows.
///
/// Implemented by the real sheet download and by test stubs; the cache
/// fronts any implementation.
#[async_trait::async_trait]
pub trait FetchObservations: Send + Sync {
    /// Fetches the full current observation set.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the download or decode fails.
    async fn fetch(&self) -> Result<Vec<Observation>, SourceError>;
}
