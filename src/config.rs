//! Runtime configuration read from the environment.

use crate::financing::{FinancingParams, PercentageKind, balance};
use crate::session::DEFAULT_UF_RATE;
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_UF_RATE: &str = "UF_QUOTE_UF_RATE";
pub const ENV_DOWN_PAYMENT: &str = "UF_QUOTE_DOWN_PAYMENT";
pub const ENV_TERM_YEARS: &str = "UF_QUOTE_TERM_YEARS";
pub const ENV_ANNUAL_RATE: &str = "UF_QUOTE_ANNUAL_RATE";
pub const ENV_LOG_LEVEL: &str = "UF_QUOTE_LOG_LEVEL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be {expected}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Top-level configuration for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// CLP per UF.
    pub uf_rate: Decimal,
    /// Financing inputs a new session starts with.
    pub financing: FinancingParams,
    /// Tracing filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            uf_rate: DEFAULT_UF_RATE,
            financing: FinancingParams::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, falling back to defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let uf_rate = match lookup(ENV_UF_RATE) {
            Some(raw) => {
                let rate = parse_decimal(ENV_UF_RATE, &raw)?;
                if rate <= Decimal::ZERO {
                    return Err(out_of_range(ENV_UF_RATE, &raw, "greater than 0"));
                }
                rate
            }
            None => defaults.uf_rate,
        };

        let mut financing = defaults.financing;
        if let Some(raw) = lookup(ENV_DOWN_PAYMENT) {
            let value = parse_decimal(ENV_DOWN_PAYMENT, &raw)?;
            if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
                return Err(out_of_range(ENV_DOWN_PAYMENT, &raw, "between 0 and 100"));
            }
            let (down_payment, loan) = balance(PercentageKind::DownPayment, value);
            financing.down_payment_pct = down_payment;
            financing.loan_pct = loan;
        }
        if let Some(raw) = lookup(ENV_TERM_YEARS) {
            financing.term_years = raw.trim().parse::<u32>().map_err(|_| ConfigError::InvalidNumber {
                key: ENV_TERM_YEARS,
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = lookup(ENV_ANNUAL_RATE) {
            financing.annual_rate_pct = parse_decimal(ENV_ANNUAL_RATE, &raw)?;
        }

        let log_level = lookup(ENV_LOG_LEVEL).unwrap_or(defaults.log_level);

        Ok(Self {
            uf_rate,
            financing,
            log_level,
        })
    }
}

fn parse_decimal(key: &'static str, raw: &str) -> Result<Decimal, ConfigError> {
    Decimal::from_str(raw.trim()).map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_string(),
    })
}

fn out_of_range(key: &'static str, raw: &str, expected: &'static str) -> ConfigError {
    ConfigError::OutOfRange {
        key,
        value: raw.to_string(),
        expected,
    }
}
