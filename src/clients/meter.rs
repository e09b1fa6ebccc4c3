use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::config::MeterApiConfig;
use crate::error::{AppError, Result};
use crate::models::QuarterUsageResponse;

/// Request/response contract for the meter cloud's quarter-hour endpoint.
/// One call per (device, date) pair; no caching, no deduplication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuarterUsageFetch: Send + Sync {
    async fn fetch_quarter_usage(
        &self,
        device_serial: &str,
        date: NaiveDate,
    ) -> Result<QuarterUsageResponse>;
}

/// HTTP client for the meter cloud. The bearer credential is handed in via
/// configuration, never read from ambient state.
#[derive(Debug, Clone)]
pub struct MeterClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: String,
}

impl MeterClient {
    pub fn new(config: &MeterApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }
}

#[async_trait]
impl QuarterUsageFetch for MeterClient {
    async fn fetch_quarter_usage(
        &self,
        device_serial: &str,
        date: NaiveDate,
    ) -> Result<QuarterUsageResponse> {
        let url = format!("{}/v1/energy/quarter", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("deviceSerial", device_serial),
                ("date", &date.to_string()),
            ])
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.auth_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_trailing_slash_from_base_url() {
        let config = MeterApiConfig {
            base_url: "https://meter.example.com/".to_string(),
            auth_token: "token".to_string(),
            timeout_secs: 5,
        };

        let client = MeterClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://meter.example.com");
    }
}
