use super::{market, ui};
use crate::core::{
    Calculation, CalculationRequest, Dataset, EstimateError, MarketDataGateway, Readiness,
    estimator, funds,
};
use anyhow::{Result, bail};
use comfy_table::Cell;
use tracing::info;

/// User input for one estimate.
#[derive(Debug, Clone)]
pub struct EstimateArgs {
    pub ticker: String,
    pub principal: f64,
    pub years: f64,
    pub series_id: String,
    pub range: String,
    pub interval: String,
}

impl EstimateArgs {
    pub fn validate(&self) -> Result<()> {
        if self.ticker.trim().is_empty() {
            bail!("Ticker must not be empty");
        }
        if !self.principal.is_finite() || self.principal < 0.0 {
            bail!("Investment amount must be a non-negative number");
        }
        if !self.years.is_finite() || self.years < 0.0 {
            bail!("Time horizon must be a non-negative number of years");
        }
        Ok(())
    }

    fn request(&self) -> CalculationRequest {
        CalculationRequest {
            ticker: self.ticker.trim().to_string(),
            series_id: self.series_id.clone(),
            range: self.range.clone(),
            interval: self.interval.clone(),
        }
    }
}

/// Everything shown for a finished calculation.
pub struct EstimateReport {
    pub ticker: String,
    pub fund_name: Option<String>,
    pub principal: f64,
    pub years: f64,
    pub beta: Option<f64>,
    pub market_return_rate: Option<f64>,
    pub risk_free_rate: f64,
    pub required_return: Option<f64>,
    pub future_value: Result<f64, EstimateError>,
    pub errors: Vec<String>,
}

impl EstimateReport {
    pub fn new(calculation: &Calculation, risk_free_rate: f64, principal: f64, years: f64) -> Self {
        let inputs = calculation.inputs(risk_free_rate, principal, years);
        let required_return = match (inputs.beta, inputs.market_return_rate) {
            (Some(beta), Some(rate)) if rate.is_finite() => {
                Some(estimator::required_return(beta, rate, risk_free_rate))
            }
            _ => None,
        };

        let errors = [
            calculation.beta.error(),
            calculation.observations.error(),
        ]
        .into_iter()
        .flatten()
        .map(|e| e.to_string())
        .collect();

        EstimateReport {
            ticker: calculation.ticker.clone(),
            fund_name: funds::lookup(&calculation.ticker).map(|f| f.name.to_string()),
            principal,
            years,
            beta: inputs.beta,
            market_return_rate: inputs.market_return_rate,
            risk_free_rate,
            required_return,
            future_value: calculation.estimate(risk_free_rate, principal, years),
            errors,
        }
    }

    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Input"), ui::header_cell("Value")]);

        let has_error = !self.errors.is_empty();
        let beta = self
            .beta
            .map_or_else(|| ui::na_cell(has_error), |b| Cell::new(format!("{b:.4}")));
        let market_return = match self.market_return_rate {
            Some(rate) if rate.is_finite() => ui::rate_cell(rate),
            _ => ui::na_cell(has_error || self.market_return_rate.is_some()),
        };

        table.add_row(vec![
            ui::label_cell("Investment"),
            Cell::new(format!("{:.2}", self.principal)),
        ]);
        table.add_row(vec![
            ui::label_cell("Time Horizon (Years)"),
            Cell::new(format!("{}", self.years)),
        ]);
        table.add_row(vec![ui::label_cell("Beta"), beta]);
        table.add_row(vec![ui::label_cell("Market Return"), market_return]);
        table.add_row(vec![
            ui::label_cell("Risk-free Rate"),
            ui::rate_cell(self.risk_free_rate),
        ]);
        table.add_row(vec![
            ui::label_cell("Required Return"),
            self.required_return
                .map_or_else(|| ui::na_cell(has_error), ui::rate_cell),
        ]);

        let title = match &self.fund_name {
            Some(name) => format!("{name} ({})", self.ticker),
            None => self.ticker.clone(),
        };
        let mut output = format!(
            "Fund: {}\n\n",
            ui::style_text(&title, ui::StyleType::Title)
        );
        output.push_str(&table.to_string());

        let future_value = match &self.future_value {
            Ok(value) => ui::style_text(&format!("{value:.2}"), ui::StyleType::TotalValue),
            Err(e) => ui::style_text(&format!("N/A ({e})"), ui::StyleType::Error),
        };
        output.push_str(&format!(
            "\n\n{}: {}",
            ui::style_text("Future Value", ui::StyleType::TotalLabel),
            future_value
        ));

        for error in &self.errors {
            output.push_str(&format!(
                "\n{}",
                ui::style_text(error, ui::StyleType::Error)
            ));
        }

        output
    }
}

pub async fn run(
    args: &EstimateArgs,
    risk_free_rate: f64,
    gateway: &MarketDataGateway<'_>,
) -> Result<()> {
    args.validate()?;
    let request = args.request();

    let pb = ui::new_progress_bar(3, true);
    pb.set_message("Fetching market data...");
    let calculation = gateway
        .load(&request, &|dataset: Dataset| {
            pb.inc(1);
            pb.set_message(format!("Fetched {dataset}"));
        })
        .await;
    pb.finish_and_clear();

    let report = EstimateReport::new(&calculation, risk_free_rate, args.principal, args.years);
    if let Ok(value) = &report.future_value {
        info!(ticker = %report.ticker, future_value = *value, "Estimated future value");
    }
    println!("{}", report.display_as_table());

    ui::print_separator();
    match &calculation.trend {
        Readiness::Ready(trend) => {
            println!(
                "Price trend ({}, {}):\n",
                request.range, request.interval
            );
            println!("{}", market::display_trend(trend));
        }
        Readiness::Failed(e) => {
            println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
        }
        Readiness::Pending => {}
    }

    Ok(())
}
