//! Euro import price estimate for a car priced in Japanese yen
//!
//! Prices and delivery are entered in thousands of yen. The estimate is
//! `((price + delivery) * 1000 * rate) * 1.3 + 550`: a fixed 30% import and
//! service margin on top of the converted price, plus a flat fee in euros.
//! An optional markup percentage is applied to the yen price only.

use std::fmt::Display;

/// Inputs are expressed in thousands of yen.
pub const YEN_UNIT: f64 = 1000.0;

/// Import and service margin applied to the converted price.
pub const IMPORT_MARGIN: f64 = 1.3;

pub const FLAT_FEE_EUR: f64 = 550.0;

/// Raw text of the editable fields, exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationInput {
    pub yen_price: String,
    pub delivery_cost: String,
    pub markup_percent: String,
}

impl CalculationInput {
    pub fn new(yen_price: &str, delivery_cost: &str, markup_percent: &str) -> Self {
        Self {
            yen_price: yen_price.to_string(),
            delivery_cost: delivery_cost.to_string(),
            markup_percent: markup_percent.to_string(),
        }
    }
}

/// One of the four copyable euro amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultField {
    Base,
    Final,
    BaseWithMarkup,
    FinalWithMarkup,
}

impl Display for ResultField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ResultField::Base => "base",
                ResultField::Final => "final",
                ResultField::BaseWithMarkup => "base-with-markup",
                ResultField::FinalWithMarkup => "final-with-markup",
            }
        )
    }
}

/// Formatted output of [`calculate`]. Every field is `None` together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationResult {
    pub base_price: Option<String>,
    pub final_price: Option<String>,
    pub yen_price_with_markup: Option<String>,
    pub base_price_with_markup: Option<String>,
    pub final_price_with_markup: Option<String>,
}

impl CalculationResult {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_absent(&self) -> bool {
        self.final_price.is_none()
    }

    /// The string handed to the clipboard for `field`.
    pub fn get(&self, field: ResultField) -> Option<&str> {
        match field {
            ResultField::Base => self.base_price.as_deref(),
            ResultField::Final => self.final_price.as_deref(),
            ResultField::BaseWithMarkup => self.base_price_with_markup.as_deref(),
            ResultField::FinalWithMarkup => self.final_price_with_markup.as_deref(),
        }
    }
}

/// Parses a decimal, ignoring thousands separators.
pub fn parse_amount(text: &str) -> Option<f64> {
    text.replace(',', "").parse::<f64>().ok()
}

fn with_import_margin(base_euro: f64) -> f64 {
    base_euro * IMPORT_MARGIN + FLAT_FEE_EUR
}

/// Computes the four euro amounts for `input` at `rate` (EUR per JPY).
///
/// Price and delivery must both parse, and a rate must be known, otherwise
/// the result is absent. An unparsable markup counts as 0%.
pub fn calculate(input: &CalculationInput, rate: Option<f64>) -> CalculationResult {
    let (Some(rate), Some(yen_price), Some(delivery)) = (
        rate,
        parse_amount(&input.yen_price),
        parse_amount(&input.delivery_cost),
    ) else {
        return CalculationResult::absent();
    };
    let markup = parse_amount(&input.markup_percent).unwrap_or(0.0);

    let yen_total = (yen_price + delivery) * YEN_UNIT;
    let base_euro = yen_total * rate;
    let final_euro = with_import_margin(base_euro);

    let yen_price_with_markup = yen_price * (1.0 + markup / 100.0);
    let yen_total_with_markup = (yen_price_with_markup + delivery) * YEN_UNIT;
    let base_euro_with_markup = yen_total_with_markup * rate;
    let final_euro_with_markup = with_import_margin(base_euro_with_markup);

    CalculationResult {
        base_price: Some(format!("{base_euro:.2}")),
        final_price: Some(format!("{final_euro:.2}")),
        yen_price_with_markup: Some(format!("{yen_price_with_markup:.0}")),
        base_price_with_markup: Some(format!("{base_euro_with_markup:.2}")),
        final_price_with_markup: Some(format!("{final_euro_with_markup:.2}")),
    }
}
