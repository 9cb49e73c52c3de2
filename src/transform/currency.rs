//! Numeric coercion and currency conversion
//!
//! Rounding is round-half-to-even on the value scaled to cents, so a figure
//! that lands exactly on a half cent goes to the even cent: 0.125 → 0.12,
//! 0.375 → 0.38.

use crate::config::RatesConfig;

/// Fixed conversion rates, in units of the target currency per USD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRates {
    pub gbp: f64,
    pub eur: f64,
    pub inr: f64,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        RatesConfig::default().into()
    }
}

impl From<RatesConfig> for ExchangeRates {
    fn from(rates: RatesConfig) -> Self {
        Self {
            gbp: rates.gbp,
            eur: rates.eur,
            inr: rates.inr,
        }
    }
}

/// Parses a market-cap cell into a number
///
/// Thousands separators are removed first. Anything that still isn't a
/// finite number (`"N/A"`, `""`, `"NaN"`) is treated as missing.
pub fn parse_market_cap(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Rounds to two decimal places, ties to even
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Multiplies by `rate` and rounds the result to cents
pub fn convert(usd: f64, rate: f64) -> f64 {
    round_to_cents(usd * rate)
}
