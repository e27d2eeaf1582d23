use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::Config;
use crate::error::Error;
use crate::forecast;
use crate::model::ForecastReport;

/// OpenWeather 5-day/3-hour forecast endpoint.
pub const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Something that can turn a location query into a raw forecast document.
///
/// One call per search: it completes exactly once with the body or an error,
/// is never retried and never cancelled. The caller has already checked that
/// the query is non-empty.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self, query: &str) -> Result<String, Error>;
}

/// HTTP client for the forecast endpoint.
///
/// Constructed explicitly and handed to whoever needs it; there is no shared
/// process-wide instance. Units are fixed to imperial at request time.
#[derive(Debug, Clone)]
pub struct ForecastFetcher {
    http: Client,
    api_key: String,
    base_url: String,
}

impl ForecastFetcher {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, FORECAST_URL.to_string())
    }

    /// Point the fetcher at a different endpoint. Used by tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url,
        }
    }

    async fn fetch_raw(&self, query: &str) -> Result<String, Error> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("zip", query),
                ("units", "imperial"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Fetch {
                status: e.status().map(|s| s.as_u16()),
                source: Some(e),
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| Error::Fetch {
            status: Some(status.as_u16()),
            source: Some(e),
        })?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "forecast request rejected");
            tracing::debug!(body = %truncate_body(&body), "upstream error body");
            return Err(Error::Fetch {
                status: Some(status.as_u16()),
                source: None,
            });
        }

        tracing::debug!(bytes = body.len(), "forecast response received");
        Ok(body)
    }

    /// Fetch and parse in one step, formatting times in the host's local zone.
    pub async fn forecast(&self, query: &str) -> Result<ForecastReport, Error> {
        let raw = self.fetch_raw(query).await?;
        forecast::parse_forecast(&raw)
    }
}

#[async_trait]
impl ForecastSource for ForecastFetcher {
    async fn fetch(&self, query: &str) -> Result<String, Error> {
        self.fetch_raw(query).await
    }
}

/// Construct a fetcher from config.
pub fn fetcher_from_config(config: &Config) -> anyhow::Result<ForecastFetcher> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `sunspotter configure` and enter your OpenWeather API key."
        )
    })?;

    Ok(ForecastFetcher::new(api_key.to_owned()))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetcher_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = fetcher_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn fetcher_from_config_works_when_key_is_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let fetcher = fetcher_from_config(&cfg);
        assert!(fetcher.is_ok());
    }

    #[test]
    fn truncate_body_shortens_long_bodies() {
        let long = "x".repeat(500);
        let short = truncate_body(&long);
        assert_eq!(short.len(), 203);
        assert!(short.ends_with("..."));

        assert_eq!(truncate_body("tiny"), "tiny");
    }
}
