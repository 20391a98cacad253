//! Latest-release lookup against the GitHub releases API.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_RELEASE_URL: &str =
    "https://api.github.com/repos/eyotang/dev-box/releases/latest";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Error)]
pub enum UpdateCheckError {
    #[error("network error: {0}")]
    Network(String),

    #[error("invalid content: {0}")]
    InvalidContent(String),
}

impl From<reqwest::Error> for UpdateCheckError {
    fn from(e: reqwest::Error) -> Self {
        UpdateCheckError::Network(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LatestRelease {
    #[serde(default)]
    pub name: String,
    pub tag_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub html_url: String,
}

/// Where and how long to look for releases.
#[derive(Debug, Clone)]
pub struct ReleaseChecker {
    url: String,
    timeout: Duration,
}

impl Default for ReleaseChecker {
    fn default() -> Self {
        Self::new(DEFAULT_RELEASE_URL, DEFAULT_TIMEOUT)
    }
}

impl ReleaseChecker {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn fetch_latest(&self) -> Result<LatestRelease, UpdateCheckError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("devbox/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let response = client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, %status, "Release lookup failed");
            return Err(UpdateCheckError::Network(format!("unexpected status {status}")));
        }
        let body = response.text()?;
        let release = parse_latest_release(&body)?;
        debug!(tag = %release.tag_name, "Fetched latest release");
        Ok(release)
    }
}

pub fn parse_latest_release(body: &str) -> Result<LatestRelease, UpdateCheckError> {
    serde_json::from_str(body).map_err(|err| UpdateCheckError::InvalidContent(err.to_string()))
}

/// Versions are reported with a leading `v`, as release tags are.
pub fn normalize_version(version: &str) -> String {
    let version = version.trim();
    if version.starts_with('v') {
        version.to_string()
    } else {
        format!("v{version}")
    }
}
