//! Configuration module

use std::env;

use credit_core::DEFAULT_CATEGORICAL_FIELDS;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Model bundle path
    pub model_path: String,

    /// Raw categorical form fields consumed before alignment
    pub categorical_fields: Vec<String>,

    /// Log format (pretty, json)
    pub log_format: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            model_path: lookup("MODEL_PATH")
                .unwrap_or_else(|| "credit_model.json".to_string()),

            categorical_fields: lookup("CATEGORICAL_FIELDS")
                .map(|v| parse_list(&v))
                .unwrap_or_else(|| {
                    DEFAULT_CATEGORICAL_FIELDS.iter().map(|s| s.to_string()).collect()
                }),

            log_format: lookup("LOG_FORMAT")
                .unwrap_or_else(|| "pretty".to_string()),

            environment: lookup("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string()),
        }
    }

    pub fn log_json(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
