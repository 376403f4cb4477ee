//! Caller-owned state for one calculator session
//!
//! Holds the editable inputs, the current rate and the derived result. Every
//! mutation recomputes the result synchronously; there is no caching.

use super::calculator::{CalculationInput, CalculationResult, calculate};
use super::config::InputDefaults;
use super::rate::RateQuote;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Session {
    input: CalculationInput,
    quote: Option<RateQuote>,
    loading: bool,
    result: CalculationResult,
}

impl Session {
    pub fn new(defaults: &InputDefaults) -> Self {
        Self {
            input: CalculationInput {
                yen_price: String::new(),
                delivery_cost: defaults.delivery_cost.clone(),
                markup_percent: defaults.markup_percent.clone(),
            },
            quote: None,
            loading: true,
            result: CalculationResult::absent(),
        }
    }

    pub fn input(&self) -> &CalculationInput {
        &self.input
    }

    pub fn result(&self) -> &CalculationResult {
        &self.result
    }

    pub fn quote(&self) -> Option<&RateQuote> {
        self.quote.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message to surface when the approximate rate is in use.
    pub fn caveat(&self) -> Option<&str> {
        self.quote().and_then(|q| q.caveat.as_deref())
    }

    pub fn set_yen_price(&mut self, text: &str) -> &CalculationResult {
        self.input.yen_price = text.to_string();
        self.recalculate()
    }

    pub fn set_delivery_cost(&mut self, text: &str) -> &CalculationResult {
        self.input.delivery_cost = text.to_string();
        self.recalculate()
    }

    pub fn set_markup_percent(&mut self, text: &str) -> &CalculationResult {
        self.input.markup_percent = text.to_string();
        self.recalculate()
    }

    /// Replaces the current rate, never merging with the previous one.
    pub fn apply_quote(&mut self, quote: RateQuote) -> &CalculationResult {
        debug!(rate = quote.value, provenance = %quote.provenance, "Applying rate quote");
        self.quote = Some(quote);
        self.loading = false;
        self.recalculate()
    }

    /// Marks the rate as being fetched again. Inputs are kept; the previous
    /// rate stays in effect until the new quote arrives.
    pub fn begin_refresh(&mut self) {
        debug!("Refreshing exchange rate");
        self.loading = true;
    }

    fn recalculate(&mut self) -> &CalculationResult {
        self.result = calculate(&self.input, self.quote.as_ref().map(|q| q.value));
        &self.result
    }
}
