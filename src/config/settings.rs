//! User settings for tripsplit
//!
//! Holds the two trip currencies, the fixed exchange rate between them and
//! the default log level.

use serde::{Deserialize, Serialize};

use super::paths::TripPaths;
use crate::error::TripError;
use crate::models::{Currency, ExchangeRate};

/// How a currency is labelled in output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyLabel {
    /// ISO-style code, also accepted as an alias on input ("USD")
    pub code: String,
    /// Symbol prefixed to amounts ("$")
    pub symbol: String,
}

impl CurrencyLabel {
    pub fn new(code: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            symbol: symbol.into(),
        }
    }
}

/// User settings for tripsplit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Settlement currency
    #[serde(default = "default_primary")]
    pub primary: CurrencyLabel,

    /// Local currency expenses may be entered in
    #[serde(default = "default_secondary")]
    pub secondary: CurrencyLabel,

    /// SECONDARY units per one PRIMARY unit
    #[serde(default)]
    pub exchange_rate: ExchangeRate,

    /// Date format used in tables (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_primary() -> CurrencyLabel {
    CurrencyLabel::new("USD", "$")
}

fn default_secondary() -> CurrencyLabel {
    CurrencyLabel::new("KRW", "₩")
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            primary: default_primary(),
            secondary: default_secondary(),
            exchange_rate: ExchangeRate::default(),
            date_format: default_date_format(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &TripPaths) -> Result<Self, TripError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TripError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| TripError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TripPaths) -> Result<(), TripError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TripError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TripError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check that the two currencies can be told apart
    pub fn validate(&self) -> Result<(), TripError> {
        if self.primary.code.trim().is_empty() || self.secondary.code.trim().is_empty() {
            return Err(TripError::Config("Currency codes cannot be empty".into()));
        }
        if self.primary.code.eq_ignore_ascii_case(&self.secondary.code) {
            return Err(TripError::Config(format!(
                "Primary and secondary currency are both '{}'",
                self.primary.code
            )));
        }
        Ok(())
    }

    /// Interpret a user-typed currency tag or configured code
    pub fn parse_currency(&self, tag: &str) -> Currency {
        Currency::parse_with_codes(tag, &self.primary.code, &self.secondary.code)
    }

    /// Label used for a currency in output
    pub fn label_for(&self, currency: &Currency) -> String {
        match currency {
            Currency::Primary => self.primary.code.clone(),
            Currency::Secondary => self.secondary.code.clone(),
            Currency::Unrecognized(tag) => format!("?{}", tag),
        }
    }

    /// Symbol of the settlement currency
    pub fn settlement_symbol(&self) -> &str {
        &self.primary.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.primary.code, "USD");
        assert_eq!(settings.secondary.code, "KRW");
        assert_eq!(settings.exchange_rate.value(), dec!(1450));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TripPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.exchange_rate = ExchangeRate::new(dec!(1380.5)).unwrap();
        settings.secondary = CurrencyLabel::new("JPY", "¥");
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.exchange_rate.value(), dec!(1380.5));
        assert_eq!(loaded.secondary.code, "JPY");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_zero_rate_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TripPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"exchange_rate": "0"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, TripError::Config(_)));
    }

    #[test]
    fn test_same_currency_twice_rejected() {
        let mut settings = Settings::default();
        settings.secondary.code = "usd".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_parse_currency_codes() {
        let settings = Settings::default();
        assert_eq!(settings.parse_currency("usd"), Currency::Primary);
        assert_eq!(settings.parse_currency("KRW"), Currency::Secondary);
        assert_eq!(settings.parse_currency("secondary"), Currency::Secondary);
        assert!(!settings.parse_currency("EUR").is_recognized());
    }
}
