//! Exchange rate types and the rate source abstraction

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Display;
use thiserror::Error;

/// Approximate JPY to EUR rate used when no remote source answers.
pub const FALLBACK_RATE: f64 = 0.0062;

/// Shown to the user whenever [`FALLBACK_RATE`] is in use.
pub const FALLBACK_CAVEAT: &str = "Approximate exchange rate in use";

/// Which step of the resolution chain produced a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    Primary,
    Secondary,
    Fallback,
}

impl Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Provenance::Primary => "primary",
                Provenance::Secondary => "secondary",
                Provenance::Fallback => "fallback",
            }
        )
    }
}

/// A resolved JPY to EUR rate. Replaced wholesale on every resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub value: f64,
    pub provenance: Provenance,
    pub source: String,
    pub caveat: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl RateQuote {
    pub fn fetched(value: f64, provenance: Provenance, source: &str) -> Self {
        Self {
            value,
            provenance,
            source: source.to_string(),
            caveat: None,
            fetched_at: Utc::now(),
        }
    }

    pub fn fallback() -> Self {
        Self {
            value: FALLBACK_RATE,
            provenance: Provenance::Fallback,
            source: "built-in".to_string(),
            caveat: Some(FALLBACK_CAVEAT.to_string()),
            fetched_at: Utc::now(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::Fallback
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Malformed request URL {url}: {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// A remote service able to quote the JPY to EUR rate.
///
/// Each implementation owns its endpoint layout and response schema; the
/// resolver only sees the rate or the reason it could not be obtained.
#[async_trait]
pub trait RateSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<f64, FetchError>;
}
