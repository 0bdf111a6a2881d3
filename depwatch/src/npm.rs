use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const NPM_REGISTRY: &str = "https://registry.npmjs.org";

/// Default bound on a single registry request
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

const USER_AGENT: &str = concat!("depwatch/", env!("CARGO_PKG_VERSION"));

/// Broad category of a failed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Network,
    Http,
    Malformed,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error fetching {name}: {source}")]
    Network {
        name: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error fetching {name}: {status}")]
    Http {
        name: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response for {name}: {reason}")]
    Malformed { name: String, reason: String },
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Network { .. } => FetchErrorKind::Network,
            FetchError::Http { .. } => FetchErrorKind::Http,
            FetchError::Malformed { .. } => FetchErrorKind::Malformed,
        }
    }

    fn malformed(name: &str, reason: impl Into<String>) -> Self {
        FetchError::Malformed {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Client for the npm registry dist-tags endpoint
#[derive(Clone)]
pub struct NpmClient {
    client: reqwest::Client,
    base_url: String,
}

impl NpmClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Encode package name for URL (handles scoped packages)
    fn encode_package_name(name: &str) -> String {
        if name.starts_with('@') {
            name.replace('/', "%2F")
        } else {
            name.to_string()
        }
    }

    fn dist_tags_url(&self, name: &str) -> String {
        format!(
            "{}/-/package/{}/dist-tags",
            self.base_url,
            Self::encode_package_name(name)
        )
    }

    /// Get the version currently tagged `latest`
    pub async fn fetch_latest(&self, name: &str) -> Result<String, FetchError> {
        let url = self.dist_tags_url(name);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Network {
                name: name.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                name: name.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Network {
            name: name.to_string(),
            source,
        })?;

        let tags: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| FetchError::malformed(name, format!("invalid JSON: {e}")))?;

        match tags.get("latest").and_then(serde_json::Value::as_str) {
            Some(latest) if !latest.is_empty() => Ok(latest.to_string()),
            _ => Err(FetchError::malformed(name, "latest tag missing")),
        }
    }

    /// Fetch several packages one after another.
    ///
    /// Every name gets a result; a failure never stops the remaining fetches.
    pub async fn fetch_all(
        &self,
        names: &[String],
        progress: impl Fn(usize, usize),
    ) -> Vec<(String, Result<String, FetchError>)> {
        let total = names.len();
        let mut results = Vec::with_capacity(total);

        for (index, name) in names.iter().enumerate() {
            let result = self.fetch_latest(name).await;
            progress(index + 1, total);
            results.push((name.clone(), result));
        }

        results
    }
}

impl Default for NpmClient {
    fn default() -> Self {
        Self::new(NPM_REGISTRY, FETCH_TIMEOUT)
    }
}
