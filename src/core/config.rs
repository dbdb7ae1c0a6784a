use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const FRED_API_KEY_ENV: &str = "FRED_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BetaProviderConfig {
    pub base_url: String,
}

impl Default for BetaProviderConfig {
    fn default() -> Self {
        BetaProviderConfig {
            base_url: "https://api.newtonanalytics.com/stock-beta/".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FredProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for FredProviderConfig {
    fn default() -> Self {
        FredProviderConfig {
            base_url: "https://api.stlouisfed.org/fred".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct YahooProviderConfig {
    pub base_url: String,
}

impl Default for YahooProviderConfig {
    fn default() -> Self {
        YahooProviderConfig {
            base_url: "https://query1.finance.yahoo.com".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub beta: BetaProviderConfig,
    #[serde(default)]
    pub fred: FredProviderConfig,
    #[serde(default)]
    pub yahoo: YahooProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RateUnit {
    Fraction,
    Percent,
}

/// The constant risk-free rate. The unit must be stated alongside the value.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct RiskFreeRate {
    pub value: f64,
    pub unit: RateUnit,
}

impl RiskFreeRate {
    pub fn as_fraction(&self) -> f64 {
        match self.unit {
            RateUnit::Fraction => self.value,
            RateUnit::Percent => self.value / 100.0,
        }
    }
}

impl Default for RiskFreeRate {
    fn default() -> Self {
        RiskFreeRate {
            value: 4.53,
            unit: RateUnit::Percent,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TrendConfig {
    pub range: String,
    pub interval: String,
}

impl Default for TrendConfig {
    fn default() -> Self {
        TrendConfig {
            range: "6mo".to_string(),
            interval: "1wk".to_string(),
        }
    }
}

fn default_market_series_id() -> String {
    "SP500".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub risk_free_rate: RiskFreeRate,
    #[serde(default = "default_market_series_id")]
    pub market_series_id: String,
    #[serde(default)]
    pub trend: TrendConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            risk_free_rate: RiskFreeRate::default(),
            market_series_id: default_market_series_id(),
            trend: TrendConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.to_string_lossy()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "mfcalc", "mfcalc")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// FRED API key from the config file, or the environment.
    pub fn fred_api_key(&self) -> Option<String> {
        self.providers
            .fred
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(FRED_API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}
