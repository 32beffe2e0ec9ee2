//! Read-only client for the dashboard JSON endpoints

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::{ChartPayload, CountPayload, PayloadError};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid payload from {url}: {source}")]
    Invalid {
        url: String,
        #[source]
        source: PayloadError,
    },
}

/// Issues GET requests against a base URL
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Fetch and validate a `{dataSet, labels}` payload
    pub async fn fetch_chart(&self, endpoint: &str) -> Result<ChartPayload, FetchError> {
        let url = self.url_for(endpoint);
        let payload: ChartPayload = self.get_json(&url).await?;
        payload
            .validate()
            .map_err(|source| FetchError::Invalid { url, source })?;
        Ok(payload)
    }

    pub async fn fetch_counts(&self, endpoint: &str) -> Result<CountPayload, FetchError> {
        let url = self.url_for(endpoint);
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!(%url, "fetching dashboard payload");
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_paths() {
        let client = DashboardClient::new("http://hr.local:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url_for("/employee/dashboard-employee"),
            "http://hr.local:8000/employee/dashboard-employee"
        );
        assert_eq!(client.base_url(), "http://hr.local:8000");
    }
}
