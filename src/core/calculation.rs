//! Per-request calculation state: one readiness slot per dependency and the
//! gate in front of the estimator.
use crate::core::adapter::extract_return_rate;
use crate::core::estimator::{self, EstimateError, EstimateInputs};
use crate::core::market::{MarketDataError, Observation, TrendPoint};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Readiness<T> {
    Pending,
    Ready(T),
    Failed(MarketDataError),
}

impl<T> Readiness<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Readiness::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&MarketDataError> {
        match self {
            Readiness::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<Result<T, MarketDataError>> for Readiness<T> {
    fn from(result: Result<T, MarketDataError>) -> Self {
        match result {
            Ok(value) => Readiness::Ready(value),
            Err(err) => Readiness::Failed(err),
        }
    }
}

/// The result of the three fetches for one ticker. A new ticker means a new
/// `Calculation`.
#[derive(Debug, Clone)]
pub struct Calculation {
    pub ticker: String,
    pub beta: Readiness<f64>,
    pub observations: Readiness<Vec<Observation>>,
    pub trend: Readiness<Vec<TrendPoint>>,
}

impl Calculation {
    pub fn new(ticker: &str) -> Self {
        Calculation {
            ticker: ticker.to_string(),
            beta: Readiness::Pending,
            observations: Readiness::Pending,
            trend: Readiness::Pending,
        }
    }

    pub fn market_return_rate(&self) -> Option<f64> {
        self.observations
            .ready()
            .map(|observations| extract_return_rate(observations))
    }

    /// Builds the estimator inputs from whatever is ready. The trend plays no
    /// part in the estimate.
    pub fn inputs(&self, risk_free_rate: f64, principal: f64, years: f64) -> EstimateInputs {
        EstimateInputs {
            beta: self.beta.ready().copied(),
            market_return_rate: self.market_return_rate(),
            risk_free_rate,
            principal,
            years,
        }
    }

    pub fn estimate(
        &self,
        risk_free_rate: f64,
        principal: f64,
        years: f64,
    ) -> Result<f64, EstimateError> {
        let inputs = self.inputs(risk_free_rate, principal, years);
        let result = estimator::compute(&inputs);
        if let Err(e) = &result {
            debug!(ticker = %self.ticker, error = %e, "No estimate for calculation");
        }
        result
    }
}
