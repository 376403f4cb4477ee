use super::ui;
use crate::core::calculator::parse_amount;
use crate::core::config::InputDefaults;
use crate::core::{RateQuote, RateResolver, ResultField, Session};
use anyhow::{Context, Result, bail};
use std::sync::Arc;
use tracing::{debug, info};

/// Values typed by the user. Unset fields keep the session defaults.
#[derive(Debug, Clone, Default)]
pub struct QuoteRequest {
    pub yen_price: String,
    pub delivery_cost: Option<String>,
    pub markup_percent: Option<String>,
    /// Print only this value, as it would be copied to the clipboard.
    pub field: Option<ResultField>,
}

pub async fn run(
    resolver: Arc<RateResolver>,
    defaults: &InputDefaults,
    request: &QuoteRequest,
) -> Result<()> {
    let mut session = Session::new(defaults);
    let task = resolver.spawn();
    let spinner = ui::new_spinner("Fetching exchange rate...");

    session.set_yen_price(&request.yen_price);
    if let Some(delivery) = &request.delivery_cost {
        session.set_delivery_cost(delivery);
    }
    if let Some(markup) = &request.markup_percent {
        session.set_markup_percent(markup);
    }

    let quote = tokio::select! {
        quote = task.join() => quote,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, discarding pending exchange rate");
            None
        }
    };
    spinner.finish_and_clear();
    let quote = quote.context("Exchange rate resolution was cancelled")?;
    session.apply_quote(quote);

    if let Some(field) = request.field {
        debug!(%field, "Printing single field");
        match session.result().get(field) {
            Some(value) => println!("{value}"),
            None => bail!("Price and delivery cost must be numbers"),
        }
        return Ok(());
    }

    println!("{}", render(&session));
    Ok(())
}

pub fn rate_line(quote: &RateQuote) -> String {
    match &quote.caveat {
        Some(caveat) => ui::style_text(caveat, ui::StyleType::Caveat),
        None => ui::style_text(
            &format!("Rate: 1¥ = €{:.6}", quote.value),
            ui::StyleType::Subtle,
        ),
    }
}

/// Renders the rate line followed by the "Original" and markup columns.
pub fn render(session: &Session) -> String {
    let mut output = format!(
        "{}\n",
        ui::style_text("Japan car price estimate", ui::StyleType::Title)
    );
    if let Some(quote) = session.quote() {
        output.push_str(&rate_line(quote));
        output.push('\n');
    }

    let result = session.result();
    if result.is_absent() {
        output.push_str(&ui::style_text(
            "\nEnter a price and delivery cost to see the estimate",
            ui::StyleType::Subtle,
        ));
        return output;
    }

    let input = session.input();
    // Same fallbacks as the calculation itself
    let markup = parse_amount(&input.markup_percent).unwrap_or(0.0);
    let yen_price = parse_amount(&input.yen_price).map(|p| format!("{p:.0}"));

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Original"),
        ui::header_cell(&format!("{markup:+}%")),
    ]);
    table.add_row(vec![
        ui::header_cell("Price (k¥)"),
        ui::amount_cell(yen_price.as_deref(), "", false),
        ui::amount_cell(result.yen_price_with_markup.as_deref(), "", false),
    ]);
    table.add_row(vec![
        ui::header_cell("Converted"),
        ui::amount_cell(result.get(ResultField::Base), "€", false),
        ui::amount_cell(result.get(ResultField::BaseWithMarkup), "€", false),
    ]);
    table.add_row(vec![
        ui::header_cell("Final"),
        ui::amount_cell(result.get(ResultField::Final), "€", true),
        ui::amount_cell(result.get(ResultField::FinalWithMarkup), "€", true),
    ]);

    output.push('\n');
    output.push_str(&table.to_string());
    output
}
