//! Fans out the three market data fetches for a calculation.
use crate::core::calculation::{Calculation, Readiness};
use crate::core::market::{
    BetaProvider, Dataset, MarketDataError, Observation, ObservationsProvider, TrendPoint,
    TrendProvider,
};
use tracing::{debug, info};

/// What to fetch for one calculation.
#[derive(Debug, Clone)]
pub struct CalculationRequest {
    pub ticker: String,
    pub series_id: String,
    pub range: String,
    pub interval: String,
}

pub struct MarketDataGateway<'a> {
    beta_provider: &'a (dyn BetaProvider + Send + Sync),
    observations_provider: &'a (dyn ObservationsProvider + Send + Sync),
    trend_provider: &'a (dyn TrendProvider + Send + Sync),
}

impl<'a> MarketDataGateway<'a> {
    pub fn new(
        beta_provider: &'a (dyn BetaProvider + Send + Sync),
        observations_provider: &'a (dyn ObservationsProvider + Send + Sync),
        trend_provider: &'a (dyn TrendProvider + Send + Sync),
    ) -> Self {
        MarketDataGateway {
            beta_provider,
            observations_provider,
            trend_provider,
        }
    }

    pub async fn fetch_beta(&self, ticker: &str) -> Result<f64, MarketDataError> {
        self.beta_provider
            .fetch_beta(ticker)
            .await
            .map_err(|e| MarketDataError::from_provider(Dataset::Beta, e))
    }

    pub async fn fetch_market_observations(
        &self,
        series_id: &str,
    ) -> Result<Vec<Observation>, MarketDataError> {
        self.observations_provider
            .fetch_observations(series_id)
            .await
            .map_err(|e| MarketDataError::from_provider(Dataset::Observations, e))
    }

    pub async fn fetch_price_trend(
        &self,
        ticker: &str,
        range: &str,
        interval: &str,
    ) -> Result<Vec<TrendPoint>, MarketDataError> {
        self.trend_provider
            .fetch_trend(ticker, range, interval)
            .await
            .map_err(|e| MarketDataError::from_provider(Dataset::Trend, e))
    }

    /// Issues all three fetches concurrently and records each outcome in its
    /// own slot. `on_complete` is called once per finished fetch.
    pub async fn load(
        &self,
        request: &CalculationRequest,
        on_complete: &(dyn Fn(Dataset) + Send + Sync),
    ) -> Calculation {
        info!(ticker = %request.ticker, "Fetching market data");

        let beta = async {
            let result = self.fetch_beta(&request.ticker).await;
            on_complete(Dataset::Beta);
            result
        };
        let observations = async {
            let result = self.fetch_market_observations(&request.series_id).await;
            on_complete(Dataset::Observations);
            result
        };
        let trend = async {
            let result = self
                .fetch_price_trend(&request.ticker, &request.range, &request.interval)
                .await;
            on_complete(Dataset::Trend);
            result
        };

        let (beta, observations, trend) = futures::join!(beta, observations, trend);

        let calculation = Calculation {
            ticker: request.ticker.clone(),
            beta: Readiness::from(beta),
            observations: Readiness::from(observations),
            trend: Readiness::from(trend),
        };
        debug!(?calculation, "Market data loaded");
        calculation
    }
}
