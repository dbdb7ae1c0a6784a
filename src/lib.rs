pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::estimate::EstimateArgs;
use crate::core::MarketDataGateway;
use crate::core::config::AppConfig;
use crate::providers::{
    fred::FredProvider, newton::NewtonBetaProvider, yahoo_finance::YahooFinanceProvider,
};
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Estimate {
        ticker: String,
        principal: f64,
        years: f64,
        series_id: Option<String>,
        range: Option<String>,
        interval: Option<String>,
    },
    Beta {
        ticker: String,
    },
    Observations {
        series_id: Option<String>,
    },
    Trend {
        ticker: String,
        range: Option<String>,
        interval: Option<String>,
    },
    Funds,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("mfcalc starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let providers = &config.providers;
    let beta_provider = NewtonBetaProvider::new(&providers.beta.base_url);
    let observations_provider = FredProvider::new(&providers.fred.base_url, config.fred_api_key());
    let trend_provider = YahooFinanceProvider::new(&providers.yahoo.base_url);
    let gateway = MarketDataGateway::new(&beta_provider, &observations_provider, &trend_provider);

    match command {
        AppCommand::Estimate {
            ticker,
            principal,
            years,
            series_id,
            range,
            interval,
        } => {
            let args = EstimateArgs {
                ticker,
                principal,
                years,
                series_id: series_id.unwrap_or_else(|| config.market_series_id.clone()),
                range: range.unwrap_or_else(|| config.trend.range.clone()),
                interval: interval.unwrap_or_else(|| config.trend.interval.clone()),
            };
            cli::estimate::run(&args, config.risk_free_rate.as_fraction(), &gateway).await
        }
        AppCommand::Beta { ticker } => cli::market::beta(&gateway, &ticker).await,
        AppCommand::Observations { series_id } => {
            let series_id = series_id.unwrap_or_else(|| config.market_series_id.clone());
            cli::market::observations(&gateway, &series_id).await
        }
        AppCommand::Trend {
            ticker,
            range,
            interval,
        } => {
            let range = range.unwrap_or_else(|| config.trend.range.clone());
            let interval = interval.unwrap_or_else(|| config.trend.interval.clone());
            cli::market::trend(&gateway, &ticker, &range, &interval).await
        }
        AppCommand::Funds => {
            cli::market::list_funds();
            Ok(())
        }
    }
}
