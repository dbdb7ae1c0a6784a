//! Core business logic abstractions

pub mod adapter;
pub mod calculation;
pub mod config;
pub mod estimator;
pub mod funds;
pub mod gateway;
pub mod log;
pub mod market;

// Re-export main types for cleaner imports
pub use calculation::{Calculation, Readiness};
pub use estimator::{EstimateError, EstimateInputs};
pub use gateway::{CalculationRequest, MarketDataGateway};
pub use market::{
    BetaProvider, Dataset, MarketDataError, Observation, ObservationsProvider, TrendPoint, TrendProvider,
};
