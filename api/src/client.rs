use crate::wire::ingest;
use crate::{StandingsTable, organize};
use log::debug;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_ENDPOINT: &str = "https://api.mobileqa.mlbinfra.com/api/interview/v1/records";

/// Where team records are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordsSource {
    Remote(String),
    /// Local JSON snapshot in the same shape as the endpoint's response.
    File(PathBuf),
}

impl Default for RecordsSource {
    fn default() -> Self {
        RecordsSource::Remote(DEFAULT_ENDPOINT.to_owned())
    }
}

impl std::fmt::Display for RecordsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordsSource::Remote(url) => f.write_str(url),
            RecordsSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Records API client. One GET per load, no retries.
#[derive(Debug, Clone)]
pub struct StandingsApi {
    client: Client,
    timeout: Duration,
}

impl Default for StandingsApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("mlbstand/0.1 (terminal standings viewer)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error for {url}: {source}")]
    Network { source: reqwest::Error, url: String },
    /// The text after the code is the standard reason phrase for `status`.
    /// reqwest does not keep the phrase the server sent, and HTTP/2 responses
    /// carry none.
    #[error(
        "There was an error retrieving data from the API at {url}. Response code: {} {}",
        .status.as_u16(),
        .status.canonical_reason().unwrap_or("Unknown")
    )]
    Status { status: StatusCode, url: String },
    #[error("Parse error for {url}: {source}")]
    Parsing { source: reqwest::Error, url: String },
    #[error("Could not read {}: {source}", .path.display())]
    File { source: std::io::Error, path: PathBuf },
    #[error("Invalid records json at {}: {source}", .path.display())]
    Json { source: serde_json::Error, path: PathBuf },
}

impl ApiError {
    /// HTTP status for non-success responses.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl StandingsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch, validate and organize the standings from `source`.
    ///
    /// Records that fail validation or classification end up in
    /// [`StandingsTable::rejected`]; the organizer never runs when the fetch
    /// itself fails.
    pub async fn load_standings(&self, source: &RecordsSource) -> ApiResult<StandingsTable> {
        let raw = match source {
            RecordsSource::Remote(url) => self.fetch_records(url).await?,
            RecordsSource::File(path) => read_records(path)?,
        };
        debug!("received {} records from {source}", raw.len());

        let (records, mut rejected) = ingest(raw);
        let mut table = organize(records);
        rejected.append(&mut table.rejected);
        table.rejected = rejected;
        Ok(table)
    }

    /// Fetch the raw records array from the endpoint. Elements stay untyped
    /// until [`ingest`] decodes them one by one.
    pub async fn fetch_records(&self, url: &str) -> ApiResult<Vec<Value>> {
        self.get(url).await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| ApiError::Network { source, url: url.to_owned() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { status, url: url.to_owned() });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Parsing { source, url: url.to_owned() })
    }
}

/// Read a records array from a local JSON file.
pub fn read_records(path: &Path) -> ApiResult<Vec<Value>> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| ApiError::File { source, path: path.to_owned() })?;
    serde_json::from_str(&content).map_err(|source| ApiError::Json { source, path: path.to_owned() })
}
