use crate::core::rate::FetchError;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Used when the configuration does not say otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("japan-car-calc/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
}

/// Performs a single GET and decodes the JSON body into `T`.
///
/// No retries: a rate source gets exactly one attempt per resolution.
pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, FetchError> {
    let request = client
        .get(url)
        .build()
        .map_err(|e| FetchError::MalformedUrl {
            url: url.to_string(),
            source: e,
        })?;

    debug!("Requesting exchange rate from {}", url);
    let response = client
        .execute(request)
        .await
        .map_err(|e| FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(FetchError::Network {
            url: url.to_string(),
            message: format!("HTTP error: {}", response.status()),
        });
    }

    let text = response.text().await.map_err(|e| FetchError::Network {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&text).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Rejects rates that cannot be used for a price estimate.
pub fn validate_rate(url: &str, rate: Option<f64>) -> Result<f64, FetchError> {
    match rate {
        Some(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
        Some(rate) => Err(FetchError::Decode {
            url: url.to_string(),
            message: format!("Unusable EUR rate: {rate}"),
        }),
        None => Err(FetchError::Decode {
            url: url.to_string(),
            message: "No EUR rate in response".to_string(),
        }),
    }
}
