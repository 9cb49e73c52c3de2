//! Transform stage: numeric coercion and currency conversion
//!
//! Turns raw extracted rows into `BankRecord`s carrying the USD figure and
//! its GBP, EUR and INR equivalents.

mod currency;

pub use currency::{convert, parse_market_cap, round_to_cents, ExchangeRates};

use crate::extract::ExtractedRow;

/// Column names, in output order, shared by the CSV and table sinks
pub const COLUMNS: [&str; 5] = [
    "Name",
    "MC_USD_Billion",
    "MC_GBP_Billion",
    "MC_EUR_Billion",
    "MC_INR_Billion",
];

/// A bank with its market cap in every supported currency
///
/// The converted figures are derived from the USD figure at construction and
/// cannot be set independently. `None` means the source cell was not numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct BankRecord {
    name: String,
    mc_usd_billion: Option<f64>,
    mc_gbp_billion: Option<f64>,
    mc_eur_billion: Option<f64>,
    mc_inr_billion: Option<f64>,
}

impl BankRecord {
    /// Builds a record from a USD figure, deriving the other currencies
    pub fn from_usd(name: impl Into<String>, usd: Option<f64>, rates: &ExchangeRates) -> Self {
        Self {
            name: name.into(),
            mc_usd_billion: usd,
            mc_gbp_billion: usd.map(|v| convert(v, rates.gbp)),
            mc_eur_billion: usd.map(|v| convert(v, rates.eur)),
            mc_inr_billion: usd.map(|v| convert(v, rates.inr)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mc_usd_billion(&self) -> Option<f64> {
        self.mc_usd_billion
    }

    pub fn mc_gbp_billion(&self) -> Option<f64> {
        self.mc_gbp_billion
    }

    pub fn mc_eur_billion(&self) -> Option<f64> {
        self.mc_eur_billion
    }

    pub fn mc_inr_billion(&self) -> Option<f64> {
        self.mc_inr_billion
    }

    /// The four numeric columns in `COLUMNS` order (after `Name`)
    pub fn figures(&self) -> [Option<f64>; 4] {
        [
            self.mc_usd_billion,
            self.mc_gbp_billion,
            self.mc_eur_billion,
            self.mc_inr_billion,
        ]
    }

    /// Returns true if the market cap could not be parsed
    pub fn is_missing(&self) -> bool {
        self.mc_usd_billion.is_none()
    }
}

/// Converts extracted rows into records, one for one and in order
pub fn transform(rows: &[ExtractedRow], rates: &ExchangeRates) -> Vec<BankRecord> {
    rows.iter()
        .map(|row| {
            let usd = parse_market_cap(&row.market_cap_usd);
            if usd.is_none() {
                tracing::debug!(
                    "Market cap {:?} for {:?} is not numeric; storing as missing",
                    row.market_cap_usd,
                    row.name
                );
            }
            BankRecord::from_usd(row.name.clone(), usd, rates)
        })
        .collect()
}
