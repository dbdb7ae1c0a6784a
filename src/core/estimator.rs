//! Projects the future value of an investment under CAPM with continuous
//! compounding.
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EstimateError {
    #[error("Beta and market return rate are required before estimating")]
    InputsNotReady,
    #[error("Market return rate is not a finite number: {rate}")]
    DegenerateRate { rate: f64 },
    #[error("Future value overflows over a {years} year horizon")]
    Overflow { years: f64 },
}

/// Everything an estimate depends on. Rates are fractions (0.05 == 5%).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateInputs {
    pub beta: Option<f64>,
    pub market_return_rate: Option<f64>,
    pub risk_free_rate: f64,
    pub principal: f64,
    pub years: f64,
}

/// Required rate of return: `rf + beta * (market - rf)`.
pub fn required_return(beta: f64, market_return_rate: f64, risk_free_rate: f64) -> f64 {
    risk_free_rate + beta * (market_return_rate - risk_free_rate)
}

/// Computes `principal * e^(required_return * years)`.
///
/// Returns [`EstimateError::InputsNotReady`] instead of a number while beta
/// or the market return rate is unavailable, and refuses a non-finite market
/// rate or a result that overflows. No rounding is applied.
pub fn compute(inputs: &EstimateInputs) -> Result<f64, EstimateError> {
    let (Some(beta), Some(market_return_rate)) = (inputs.beta, inputs.market_return_rate) else {
        debug!(?inputs, "Skipping estimate, inputs not ready");
        return Err(EstimateError::InputsNotReady);
    };

    if !market_return_rate.is_finite() {
        return Err(EstimateError::DegenerateRate {
            rate: market_return_rate,
        });
    }

    let rate = required_return(beta, market_return_rate, inputs.risk_free_rate);
    let future_value = inputs.principal * (rate * inputs.years).exp();
    if !future_value.is_finite() {
        return Err(EstimateError::Overflow {
            years: inputs.years,
        });
    }
    debug!(rate, future_value, "Computed future value");
    Ok(future_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(principal: f64, years: f64) -> EstimateInputs {
        EstimateInputs {
            beta: Some(1.2),
            market_return_rate: Some(0.08),
            risk_free_rate: 0.0453,
            principal,
            years,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let rate = required_return(1.2, 0.08, 0.0453);
        assert!((rate - 0.08694).abs() < 1e-12);

        let value = compute(&inputs(10000.0, 5.0)).unwrap();
        assert!((value - 15444.996395).abs() < 1e-4, "got {value}");
        assert_eq!(format!("{value:.2}"), "15445.00");
    }

    #[test]
    fn test_zero_horizon_returns_principal() {
        for principal in [1.0, 250.5, 10000.0, 1e9] {
            assert_eq!(compute(&inputs(principal, 0.0)).unwrap(), principal);
        }
    }

    #[test]
    fn test_linear_in_principal() {
        let base = compute(&inputs(1000.0, 7.5)).unwrap();
        for k in [0.5, 2.0, 3.0, 10.0] {
            let scaled = compute(&inputs(1000.0 * k, 7.5)).unwrap();
            assert!((scaled - base * k).abs() < 1e-9 * scaled.abs());
        }
    }

    #[test]
    fn test_zero_beta_grows_at_risk_free_rate() {
        let value = compute(&EstimateInputs {
            beta: Some(0.0),
            market_return_rate: Some(0.3),
            risk_free_rate: 0.05,
            principal: 1000.0,
            years: 1.0,
        })
        .unwrap();
        assert!((value - 1051.271096).abs() < 1e-5);
    }

    #[test]
    fn test_deterministic() {
        let a = compute(&inputs(12345.67, 3.25)).unwrap();
        let b = compute(&inputs(12345.67, 3.25)).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_missing_beta_is_not_ready() {
        let mut missing = inputs(10000.0, 5.0);
        missing.beta = None;
        assert_eq!(compute(&missing), Err(EstimateError::InputsNotReady));
    }

    #[test]
    fn test_missing_market_rate_is_not_ready() {
        let mut missing = inputs(10000.0, 5.0);
        missing.market_return_rate = None;
        assert_eq!(compute(&missing), Err(EstimateError::InputsNotReady));
    }

    #[test]
    fn test_non_finite_market_rate_is_refused() {
        let mut degenerate = inputs(10000.0, 5.0);
        degenerate.market_return_rate = Some(f64::INFINITY);
        assert_eq!(
            compute(&degenerate),
            Err(EstimateError::DegenerateRate {
                rate: f64::INFINITY
            })
        );

        degenerate.market_return_rate = Some(f64::NAN);
        assert!(matches!(
            compute(&degenerate),
            Err(EstimateError::DegenerateRate { rate }) if rate.is_nan()
        ));
    }

    #[test]
    fn test_overflowing_horizon_is_refused() {
        assert_eq!(
            compute(&inputs(10000.0, 10000.0)),
            Err(EstimateError::Overflow { years: 10000.0 })
        );
    }
}
