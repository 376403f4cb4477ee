use super::http::{get_json, validate_rate};
use crate::core::rate::{FetchError, RateSource};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

#[derive(Debug, Deserialize)]
struct FrankfurterResponse {
    base: Option<String>,
    date: Option<String>,
    rates: HashMap<String, f64>,
}

/// Quotes JPY to EUR through the Frankfurter conversion API, which takes
/// both currency codes as query parameters.
pub struct FrankfurterProvider {
    base_url: String,
    client: reqwest::Client,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        FrankfurterProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url(&self) -> String {
        format!("{}/latest?from=JPY&to=EUR", self.base_url)
    }
}

#[async_trait]
impl RateSource for FrankfurterProvider {
    fn name(&self) -> &str {
        "frankfurter"
    }

    #[instrument(name = "FrankfurterRateFetch", skip(self))]
    async fn fetch(&self) -> Result<f64, FetchError> {
        let url = self.url();
        let data: FrankfurterResponse = get_json(&self.client, &url).await?;
        debug!(base = ?data.base, date = ?data.date, "Received Frankfurter response");

        validate_rate(&url, data.rates.get("EUR").copied())
    }
}
