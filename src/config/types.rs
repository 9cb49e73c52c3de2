use serde::Deserialize;

/// Archived Wikipedia snapshot the job was written against
pub const DEFAULT_SOURCE_URL: &str =
    "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks";

/// Main configuration structure for Bank-ETL
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub rates: RatesConfig,
}

/// Where the bank table is fetched from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Page holding the bank table
    pub url: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with the request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: 30,
            user_agent: format!("bank-etl/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV file
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Whether the CSV starts with an unnamed row-index column
    #[serde(rename = "csv-index")]
    pub csv_index: bool,

    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Table that receives the records
    #[serde(rename = "table-name")]
    pub table_name: String,

    /// Append-only progress log
    #[serde(rename = "log-path")]
    pub log_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "./Largest_banks_data.csv".to_string(),
            csv_index: true,
            database_path: "./World_Economies.db".to_string(),
            table_name: "Largest_banks".to_string(),
            log_path: "./code_log.txt".to_string(),
        }
    }
}

/// Fixed exchange rates, in units of the target currency per USD
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RatesConfig {
    pub gbp: f64,
    pub eur: f64,
    pub inr: f64,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            gbp: 0.8,
            eur: 0.93,
            inr: 82.95,
        }
    }
}
