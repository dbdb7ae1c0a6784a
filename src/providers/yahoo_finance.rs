use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::adapter::normalize_trend;
use crate::core::{TrendPoint, TrendProvider};

// YahooFinanceProvider implementation for TrendProvider
pub struct YahooFinanceProvider {
    base_url: String,
}

impl YahooFinanceProvider {
    pub fn new(base_url: &str) -> Self {
        YahooFinanceProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct YahooChartResponse {
    chart: ChartResult,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    result: Option<Vec<ChartItem>>,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Deserialize, Debug)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
}

#[derive(Deserialize, Debug)]
struct ChartItem {
    timestamp: Option<Vec<i64>>,
    indicators: Option<Indicators>,
}

#[async_trait]
impl TrendProvider for YahooFinanceProvider {
    #[instrument(
        name = "YahooTrendFetch",
        skip(self),
        fields(ticker = %ticker)
    )]
    async fn fetch_trend(
        &self,
        ticker: &str,
        range: &str,
        interval: &str,
    ) -> Result<Vec<TrendPoint>> {
        let mut url = reqwest::Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Invalid trend base URL: {}", self.base_url))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker]);
        url.query_pairs_mut()
            .append_pair("range", range)
            .append_pair("interval", interval);
        debug!("Requesting trend data from {}", url);

        let client = reqwest::Client::builder().user_agent("mfcalc/1.0").build()?;
        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for ticker: {} URL: {}", e, ticker, url))?;

        debug!(response = ?response, "Received Yahoo response");

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for ticker: {}",
                response.status(),
                ticker
            ));
        }

        let text = response.text().await?;
        let data: YahooChartResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", ticker, e))?;

        let item = data
            .chart
            .result
            .and_then(|items| items.into_iter().next())
            .ok_or_else(|| anyhow!("No trend data found for ticker: {}", ticker))?;

        // A result without timestamps or indicators carries no usable series.
        let (Some(timestamps), Some(indicators)) = (item.timestamp, item.indicators) else {
            return Err(anyhow!("No trend data found for ticker: {}", ticker));
        };
        let closes = indicators
            .quote
            .into_iter()
            .next()
            .and_then(|q| q.close)
            .unwrap_or_default();

        let trend = normalize_trend(&timestamps, &closes)?;
        debug!(points = trend.len(), "Normalized trend");
        Ok(trend)
    }
}
