//! Ordered fallback chain over rate sources

use super::config::AppConfig;
use super::rate::{Provenance, RateQuote, RateSource};
use crate::providers::{
    frankfurter::FrankfurterProvider, http::build_client, open_er_api::OpenErApiProvider,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Tries each source once, in order, and settles on the first rate it gets.
///
/// The first source is tagged [`Provenance::Primary`], every later one
/// [`Provenance::Secondary`]. When all of them fail the built-in fallback
/// rate is returned instead, so resolution itself never fails.
pub struct RateResolver {
    sources: Vec<Box<dyn RateSource>>,
}

impl RateResolver {
    pub fn new(sources: Vec<Box<dyn RateSource>>) -> Self {
        Self { sources }
    }

    /// Frankfurter first, open.er-api second, sharing one HTTP client.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = build_client(config.timeout()).context("Failed to build HTTP client")?;
        Ok(Self::new(vec![
            Box::new(FrankfurterProvider::new(
                &config.providers.frankfurter.base_url,
                client.clone(),
            )),
            Box::new(OpenErApiProvider::new(
                &config.providers.open_er_api.base_url,
                client,
            )),
        ]))
    }

    #[instrument(name = "ResolveRate", skip(self))]
    pub async fn resolve(&self) -> RateQuote {
        for (index, source) in self.sources.iter().enumerate() {
            let provenance = if index == 0 {
                Provenance::Primary
            } else {
                Provenance::Secondary
            };

            debug!(source = source.name(), %provenance, "Attempting rate source");
            match source.fetch().await {
                Ok(value) => {
                    info!(source = source.name(), %provenance, rate = value, "Resolved exchange rate");
                    return RateQuote::fetched(value, provenance, source.name());
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Rate source failed");
                }
            }
        }

        warn!("All rate sources failed, using fallback rate");
        RateQuote::fallback()
    }

    /// Starts resolution in the background. See [`RateTask`].
    pub fn spawn(self: Arc<Self>) -> RateTask {
        RateTask {
            handle: tokio::spawn(async move { self.resolve().await }),
        }
    }
}

/// A rate resolution running on the tokio runtime.
///
/// Dropping the task aborts any request still in flight; the result of an
/// aborted task is never observed.
pub struct RateTask {
    handle: JoinHandle<RateQuote>,
}

impl RateTask {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(&self) {
        debug!("Cancelling rate resolution");
        self.handle.abort();
    }

    /// Waits for the quote. `None` if the task was cancelled.
    pub async fn join(mut self) -> Option<RateQuote> {
        match (&mut self.handle).await {
            Ok(quote) => Some(quote),
            Err(e) => {
                if !e.is_cancelled() {
                    warn!(error = %e, "Rate resolution task failed");
                }
                None
            }
        }
    }
}

impl Drop for RateTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
