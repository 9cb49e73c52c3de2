use crate::config::types::{Config, OutputConfig, RatesConfig, SourceConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_output_config(&config.output)?;
    validate_rates(&config.rates)?;
    Ok(())
}

/// Returns true if `name` is a bare SQL identifier (`[A-Za-z_][A-Za-z0-9_]*`)
///
/// The table name is spliced into SQL text, so nothing else is accepted.
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid source url '{}': {}", config.url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Source url '{}' must use http or https",
            config.url
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (key, value) in [
        ("csv_path", &config.csv_path),
        ("database_path", &config.database_path),
        ("log_path", &config.log_path),
    ] {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
        }
    }

    if !is_valid_table_name(&config.table_name) {
        return Err(ConfigError::Validation(format!(
            "table_name must be a plain SQL identifier, got '{}'",
            config.table_name
        )));
    }

    Ok(())
}

fn validate_rates(rates: &RatesConfig) -> Result<(), ConfigError> {
    for (currency, rate) in [("gbp", rates.gbp), ("eur", rates.eur), ("inr", rates.inr)] {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "rate for {} must be a positive number, got {}",
                currency, rate
            )));
        }
    }
    Ok(())
}
