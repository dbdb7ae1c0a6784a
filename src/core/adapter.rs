//! Converts raw provider payloads into the numeric series used for the
//! estimate and the trend display.
use crate::core::market::{MarketDataError, Observation, TrendPoint};
use chrono::DateTime;
use tracing::debug;

fn observation_value(observation: Option<&Observation>) -> f64 {
    observation
        .and_then(|o| o.value.as_deref())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Market return rate over the series: `(last - first) / first`.
///
/// Entries are taken in provider order. Missing or non-numeric values count
/// as zero, so a zero (or absent) first value yields a non-finite rate. The
/// caller decides what to do with it.
pub fn extract_return_rate(observations: &[Observation]) -> f64 {
    let first = observation_value(observations.first());
    let last = observation_value(observations.last());
    let rate = (last - first) / first;
    debug!(first, last, rate, "Extracted market return rate");
    rate
}

/// Pairs epoch-second timestamps with closing prices by position.
pub fn normalize_trend(
    timestamps: &[i64],
    closes: &[Option<f64>],
) -> Result<Vec<TrendPoint>, MarketDataError> {
    if timestamps.len() != closes.len() {
        return Err(MarketDataError::MalformedTrendPayload {
            timestamps: timestamps.len(),
            prices: closes.len(),
        });
    }

    timestamps
        .iter()
        .zip(closes)
        .map(|(ts, price)| {
            DateTime::from_timestamp(*ts, 0)
                .map(|dt| TrendPoint {
                    date: dt.date_naive(),
                    price: *price,
                })
                .ok_or(MarketDataError::InvalidTimestamp { timestamp: *ts })
        })
        .collect()
}
