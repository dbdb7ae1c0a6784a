//! Market data abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Datasets fetched for a single calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Beta,
    Observations,
    Trend,
}

impl Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Dataset::Beta => "beta",
                Dataset::Observations => "market observations",
                Dataset::Trend => "price trend",
            }
        )
    }
}

/// Errors surfaced by the market data gateway.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarketDataError {
    /// Network error, non-success status or unusable body from a provider.
    #[error("Failed to fetch {dataset}: {reason}")]
    FetchFailure { dataset: Dataset, reason: String },

    #[error("Malformed trend payload: {timestamps} timestamps but {prices} closing prices")]
    MalformedTrendPayload { timestamps: usize, prices: usize },

    #[error("Malformed trend payload: timestamp {timestamp} is out of range")]
    InvalidTimestamp { timestamp: i64 },
}

impl MarketDataError {
    /// Converts a provider error into the gateway taxonomy. Payload shape
    /// errors keep their identity, everything else is a `FetchFailure`.
    pub fn from_provider(dataset: Dataset, err: anyhow::Error) -> Self {
        match err.downcast::<MarketDataError>() {
            Ok(known) => known,
            Err(other) => MarketDataError::FetchFailure {
                dataset,
                reason: format!("{other:#}"),
            },
        }
    }
}

/// A single dated value from a macroeconomic series. `value` is kept as the
/// provider sent it; FRED uses `"."` for missing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl Observation {
    pub fn new(date: &str, value: &str) -> Self {
        Observation {
            date: date.to_string(),
            value: Some(value.to_string()),
        }
    }
}

/// A point of the display-only price trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub price: Option<f64>,
}

#[async_trait]
pub trait BetaProvider: Send + Sync {
    async fn fetch_beta(&self, ticker: &str) -> Result<f64>;
}

#[async_trait]
pub trait ObservationsProvider: Send + Sync {
    async fn fetch_observations(&self, series_id: &str) -> Result<Vec<Observation>>;
}

#[async_trait]
pub trait TrendProvider: Send + Sync {
    async fn fetch_trend(&self, ticker: &str, range: &str, interval: &str)
    -> Result<Vec<TrendPoint>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_provider_error_becomes_fetch_failure() {
        let err = MarketDataError::from_provider(
            Dataset::Beta,
            anyhow!("HTTP error: 500 Internal Server Error"),
        );
        assert_eq!(
            err,
            MarketDataError::FetchFailure {
                dataset: Dataset::Beta,
                reason: "HTTP error: 500 Internal Server Error".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Failed to fetch beta: HTTP error: 500 Internal Server Error"
        );
    }

    #[test]
    fn test_malformed_payload_keeps_identity() {
        let source = anyhow::Error::new(MarketDataError::MalformedTrendPayload {
            timestamps: 3,
            prices: 2,
        });
        let err = MarketDataError::from_provider(Dataset::Trend, source);
        assert_eq!(
            err,
            MarketDataError::MalformedTrendPayload {
                timestamps: 3,
                prices: 2
            }
        );
    }
}
