//! Download of the published sheet CSV export.

use screwworm_map_surveillance_models::Observation;

use crate::{FetchObservations, SourceError, parse};

/// Fetches observations from a published Google Sheet CSV export URL.
#[derive(Debug, Clone)]
pub struct SheetSource {
    url: String,
    client: reqwest::Client,
}

impl SheetSource {
    /// Creates a source for the given export URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// The export URL this source downloads.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl FetchObservations for SheetSource {
    async fn fetch(&self) -> Result<Vec<Observation>, SourceError> {
        log::debug!("Downloading sheet export from {}", self.url);

        let resp = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;

        let body = resp.bytes().await?;
        let rows = parse::parse_rows(&body)?;

        log::info!("Fetched {} observation rows from sheet export", rows.len());
        Ok(rows)
    }
}
