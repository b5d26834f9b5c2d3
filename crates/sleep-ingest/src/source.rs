//! Payload sources: the sleep diary API and saved payload files.

use std::path::{Path, PathBuf};

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Sleep-session endpoint of the diary API.
pub const DEFAULT_API_URL: &str = "https://app.consensussleepdiary.com/api/v1/sleepsession/";

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("sleep-diary/", env!("CARGO_PKG_VERSION"));

/// Something that yields one raw JSON payload.
pub trait DataSource {
    /// Fetch the payload.
    fn fetch(&self) -> Result<Value>;

    /// Human-readable origin, for logs and summaries.
    fn describe(&self) -> String;
}

/// Blocking client for the sleep-session endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::blocking::Client,
    url: String,
    token: String,
}

impl HttpSource {
    /// Creates a client authenticating with `token` as a bearer credential.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| IngestError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            token: token.into(),
        })
    }
}

impl DataSource for HttpSource {
    fn fetch(&self) -> Result<Value> {
        debug!(url = %self.url, "fetching sleep sessions");

        let response = self
            .client
            .get(&self.url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| IngestError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(IngestError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response
            .json()
            .map_err(|e| IngestError::Decode(e.to_string()))?;
        info!(url = %self.url, "sleep sessions fetched");
        Ok(payload)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// A payload saved to disk as JSON.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileSource {
    fn fetch(&self) -> Result<Value> {
        if !self.path.is_file() {
            return Err(IngestError::FileNotFound {
                path: self.path.clone(),
            });
        }
        let contents = std::fs::read_to_string(&self.path).map_err(|source| IngestError::FileRead {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| IngestError::FileParse {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
