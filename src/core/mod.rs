//! Rate resolution and price calculation

pub mod calculator;
pub mod config;
pub mod log;
pub mod rate;
pub mod resolver;
pub mod session;

// Re-export main types for cleaner imports
pub use calculator::{CalculationInput, CalculationResult, ResultField, calculate};
pub use rate::{FetchError, Provenance, RateQuote, RateSource};
pub use resolver::{RateResolver, RateTask};
pub use session::Session;
