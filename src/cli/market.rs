//! Commands that query a single market data source.
use super::ui;
use crate::core::adapter::extract_return_rate;
use crate::core::{MarketDataGateway, Observation, TrendPoint, funds};
use anyhow::{Result, bail};
use comfy_table::{Cell, CellAlignment};

pub fn display_trend(trend: &[TrendPoint]) -> String {
    if trend.is_empty() {
        return ui::style_text("No price history available", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Close"),
        ui::header_cell("Change"),
    ]);

    let mut previous: Option<f64> = None;
    for point in trend {
        let change = match (previous, point.price) {
            (Some(prev), Some(price)) if prev > 0.0 => ui::rate_cell((price - prev) / prev),
            _ => ui::na_cell(false),
        };
        table.add_row(vec![
            Cell::new(point.date.to_string()),
            ui::format_optional_cell(point.price, |p| format!("{p:.2}")),
            change,
        ]);
        if point.price.is_some() {
            previous = point.price;
        }
    }

    table.to_string()
}

pub fn display_observations(series_id: &str, observations: &[Observation]) -> String {
    let mut output = format!(
        "Series: {}\n\n",
        ui::style_text(series_id, ui::StyleType::Title)
    );

    if observations.is_empty() {
        output.push_str(&ui::style_text(
            "No observations available",
            ui::StyleType::Subtle,
        ));
        return output;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Date"), ui::header_cell("Value")]);

    // First and last are the only entries that feed the estimate.
    let last = observations.last().filter(|_| observations.len() > 1);
    for observation in [observations.first(), last].into_iter().flatten() {
        table.add_row(vec![
            Cell::new(&observation.date),
            Cell::new(observation.value.as_deref().unwrap_or("N/A"))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    output.push_str(&table.to_string());

    let rate = extract_return_rate(observations);
    let rate_text = if rate.is_finite() {
        format!("{:.2}%", rate * 100.0)
    } else {
        "N/A".to_string()
    };
    output.push_str(&format!(
        "\n\n{} ({} observations): {}",
        ui::style_text("Market Return", ui::StyleType::TotalLabel),
        observations.len(),
        rate_text
    ));
    output
}

pub async fn beta(gateway: &MarketDataGateway<'_>, ticker: &str) -> Result<()> {
    let ticker = ticker.trim();
    if ticker.is_empty() {
        bail!("Ticker must not be empty");
    }
    let beta = gateway.fetch_beta(ticker).await?;
    let name = funds::lookup(ticker).map_or(ticker, |f| f.name);
    println!(
        "{} ({ticker}) beta vs ^GSPC: {}",
        ui::style_text(name, ui::StyleType::Title),
        ui::style_text(&format!("{beta:.4}"), ui::StyleType::TotalValue)
    );
    Ok(())
}

pub async fn observations(gateway: &MarketDataGateway<'_>, series_id: &str) -> Result<()> {
    let observations = gateway.fetch_market_observations(series_id).await?;
    println!("{}", display_observations(series_id, &observations));
    Ok(())
}

pub async fn trend(
    gateway: &MarketDataGateway<'_>,
    ticker: &str,
    range: &str,
    interval: &str,
) -> Result<()> {
    let ticker = ticker.trim();
    if ticker.is_empty() {
        bail!("Ticker must not be empty");
    }
    let trend = gateway.fetch_price_trend(ticker, range, interval).await?;
    println!(
        "Price trend for {} ({range}, {interval}):\n",
        ui::style_text(ticker, ui::StyleType::Title)
    );
    println!("{}", display_trend(&trend));
    Ok(())
}

/// Lists the known funds.
pub fn list_funds() {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Ticker"), ui::header_cell("Fund")]);
    for fund in funds::FUNDS {
        table.add_row(vec![ui::label_cell(fund.ticker), Cell::new(fund.name)]);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_display_trend() {
        let trend = vec![
            TrendPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                price: Some(100.0),
            },
            TrendPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
                price: None,
            },
            TrendPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                price: Some(110.0),
            },
        ];

        let output = console::strip_ansi_codes(&display_trend(&trend)).to_string();
        assert!(output.contains("2024-01-01"));
        assert!(output.contains("100.00"));
        assert!(output.contains("2024-01-15"));
        assert!(output.contains("10.00%"));
        assert!(output.contains("N/A"));
    }

    #[test]
    fn test_display_empty_trend() {
        let output = console::strip_ansi_codes(&display_trend(&[])).to_string();
        assert_eq!(output, "No price history available");
    }

    #[test]
    fn test_display_observations() {
        let observations = vec![
            Observation::new("2024-01-02", "4000"),
            Observation::new("2024-03-01", "4100"),
            Observation::new("2024-06-28", "4800"),
        ];

        let output =
            console::strip_ansi_codes(&display_observations("SP500", &observations)).to_string();
        assert!(output.contains("SP500"));
        assert!(output.contains("2024-01-02"));
        assert!(output.contains("2024-06-28"));
        assert!(!output.contains("2024-03-01"));
        assert!(output.contains("Market Return (3 observations): 20.00%"));
    }

    #[test]
    fn test_display_observations_with_zero_start() {
        let observations = vec![
            Observation::new("2024-01-02", "0"),
            Observation::new("2024-06-28", "4800"),
        ];

        let output =
            console::strip_ansi_codes(&display_observations("SP500", &observations)).to_string();
        assert!(output.contains("Market Return (2 observations): N/A"));
    }
}
