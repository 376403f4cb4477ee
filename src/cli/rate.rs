use super::{quote::rate_line, ui};
use crate::core::RateResolver;
use anyhow::{Context, Result};
use std::sync::Arc;

pub async fn run(resolver: Arc<RateResolver>) -> Result<()> {
    let spinner = ui::new_spinner("Fetching exchange rate...");
    let quote = resolver.spawn().join().await;
    spinner.finish_and_clear();
    let quote = quote.context("Exchange rate resolution was cancelled")?;

    println!("{}", rate_line(&quote));
    println!(
        "{}",
        ui::style_text(
            &format!(
                "Source: {} ({}), fetched {}",
                quote.source,
                quote.provenance,
                quote.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            ui::StyleType::Subtle,
        )
    );
    Ok(())
}
