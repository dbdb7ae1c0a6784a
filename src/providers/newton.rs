use crate::core::BetaProvider;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Beta of a ticker against the S&P 500, from Newton Analytics.
pub struct NewtonBetaProvider {
    base_url: String,
}

impl NewtonBetaProvider {
    pub fn new(base_url: &str) -> Self {
        NewtonBetaProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BetaResponse {
    data: Option<serde_json::Value>,
}

fn parse_beta(value: &serde_json::Value) -> Option<f64> {
    let beta = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    beta.filter(|b| b.is_finite())
}

#[async_trait]
impl BetaProvider for NewtonBetaProvider {
    #[instrument(name = "NewtonBetaFetch", skip(self), fields(ticker = %ticker))]
    async fn fetch_beta(&self, ticker: &str) -> Result<f64> {
        let url = reqwest::Url::parse_with_params(
            &self.base_url,
            &[
                ("ticker", ticker),
                ("index", "^GSPC"),
                ("interval", "1d"),
                ("observations", "100"),
            ],
        )?;
        debug!("Requesting beta from {}", url);

        let client = reqwest::Client::builder().user_agent("mfcalc/1.0").build()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for ticker: {}", e, ticker))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for ticker: {}",
                response.status(),
                ticker
            ));
        }

        let text = response.text().await?;
        let data: BetaResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse beta response for {}: {}", ticker, e))?;

        let beta = data
            .data
            .as_ref()
            .and_then(parse_beta)
            .ok_or_else(|| anyhow!("No beta available for ticker: {}", ticker))?;
        debug!(beta, "Received beta");
        Ok(beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(ticker: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stock-beta/"))
            .and(query_param("ticker", ticker))
            .and(query_param("index", "^GSPC"))
            .and(query_param("interval", "1d"))
            .and(query_param("observations", "100"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(mock_server: &MockServer) -> NewtonBetaProvider {
        NewtonBetaProvider::new(&format!("{}/stock-beta/", mock_server.uri()))
    }

    #[tokio::test]
    async fn test_successful_beta_fetch() {
        let mock_server = create_mock_server("VFIAX", 200, r#"{"status":"200","data":1.02}"#).await;

        let beta = provider(&mock_server).fetch_beta("VFIAX").await.unwrap();
        assert_eq!(beta, 1.02);
    }

    #[tokio::test]
    async fn test_beta_as_string() {
        let mock_server = create_mock_server("FXAIX", 200, r#"{"data":"0.98"}"#).await;

        let beta = provider(&mock_server).fetch_beta("FXAIX").await.unwrap();
        assert_eq!(beta, 0.98);
    }

    #[tokio::test]
    async fn test_ticker_is_query_encoded() {
        let mock_server = create_mock_server("A&B", 200, r#"{"data":1.1}"#).await;

        let beta = provider(&mock_server).fetch_beta("A&B").await.unwrap();
        assert_eq!(beta, 1.1);
    }

    #[tokio::test]
    async fn test_missing_beta() {
        let mock_server = create_mock_server("SPAXX", 200, r#"{"data":null}"#).await;

        let result = provider(&mock_server).fetch_beta("SPAXX").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No beta available for ticker: SPAXX"
        );
    }

    #[tokio::test]
    async fn test_beta_api_error_response() {
        let mock_server = create_mock_server("VFIAX", 500, "").await;

        let result = provider(&mock_server).fetch_beta("VFIAX").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for ticker: VFIAX"
        );
    }

    #[tokio::test]
    async fn test_beta_malformed_response() {
        let mock_server = create_mock_server("VFIAX", 200, "<html></html>").await;

        let result = provider(&mock_server).fetch_beta("VFIAX").await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse beta response for VFIAX")
        );
    }
}
