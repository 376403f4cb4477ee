use super::http::{get_json, validate_rate};
use crate::core::rate::{FetchError, RateSource};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://open.er-api.com";

// The base currency is part of the path; the body lists every currency
// against it. Only `rates` is required.
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: Option<String>,
    base_code: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    #[serde(default)]
    rates: HashMap<String, f64>,
}

pub struct OpenErApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OpenErApiProvider {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        OpenErApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url(&self) -> String {
        format!("{}/v6/latest/JPY", self.base_url)
    }
}

#[async_trait]
impl RateSource for OpenErApiProvider {
    fn name(&self) -> &str {
        "open.er-api"
    }

    #[instrument(name = "OpenErApiRateFetch", skip(self))]
    async fn fetch(&self) -> Result<f64, FetchError> {
        let url = self.url();
        let data: LatestRatesResponse = get_json(&self.client, &url).await?;
        debug!(
            result = ?data.result,
            base = ?data.base_code,
            "Received open.er-api response"
        );

        if let Some(result) = data.result.as_deref().filter(|r| *r != "success") {
            return Err(FetchError::Decode {
                url,
                message: format!(
                    "Unsuccessful result '{}' ({})",
                    result,
                    data.error_type.as_deref().unwrap_or("unknown error")
                ),
            });
        }

        validate_rate(&url, data.rates.get("EUR").copied())
    }
}
