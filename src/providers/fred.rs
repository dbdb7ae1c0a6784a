use crate::core::{Observation, ObservationsProvider};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Series observations from the St. Louis Fed (FRED) API.
pub struct FredProvider {
    base_url: String,
    api_key: Option<String>,
}

impl FredProvider {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        FredProvider {
            base_url: base_url.to_string(),
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

#[async_trait]
impl ObservationsProvider for FredProvider {
    #[instrument(name = "FredObservationsFetch", skip(self), fields(series_id = %series_id))]
    async fn fetch_observations(&self, series_id: &str) -> Result<Vec<Observation>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("FRED API key is not configured"))?;

        let url = reqwest::Url::parse_with_params(
            &format!("{}/series/observations", self.base_url),
            &[
                ("api_key", api_key),
                ("series_id", series_id),
                ("file_type", "json"),
            ],
        )?;
        debug!(
            "Requesting observations for {} from {}/series/observations",
            series_id, self.base_url
        );

        let client = reqwest::Client::builder().user_agent("mfcalc/1.0").build()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for series: {}", e, series_id))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for series: {}",
                response.status(),
                series_id
            ));
        }

        let text = response.text().await?;
        let data: ObservationsResponse = serde_json::from_str(&text).map_err(|e| {
            anyhow!(
                "Failed to parse observations response for {}: {}",
                series_id,
                e
            )
        })?;

        debug!(count = data.observations.len(), "Received observations");
        Ok(data.observations)
    }
}
