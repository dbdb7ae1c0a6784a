use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use mfcalc::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for mfcalc::AppCommand {
    fn from(cmd: Commands) -> mfcalc::AppCommand {
        match cmd {
            Commands::Estimate {
                ticker,
                principal,
                years,
                series_id,
                range,
                interval,
            } => mfcalc::AppCommand::Estimate {
                ticker,
                principal,
                years,
                series_id,
                range,
                interval,
            },
            Commands::Beta { ticker } => mfcalc::AppCommand::Beta { ticker },
            Commands::Observations { series_id } => mfcalc::AppCommand::Observations { series_id },
            Commands::Trend {
                ticker,
                range,
                interval,
            } => mfcalc::AppCommand::Trend {
                ticker,
                range,
                interval,
            },
            Commands::Funds => mfcalc::AppCommand::Funds,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Estimate the future value of an investment in a fund
    Estimate {
        /// Fund ticker, e.g. VFIAX
        #[arg(short, long)]
        ticker: String,
        /// Initial investment amount
        #[arg(short, long)]
        principal: f64,
        /// Time horizon in years
        #[arg(short, long)]
        years: f64,
        /// FRED series used for the market return rate
        #[arg(long)]
        series_id: Option<String>,
        /// Price trend range, e.g. 6mo
        #[arg(long)]
        range: Option<String>,
        /// Price trend sampling interval, e.g. 1wk
        #[arg(long)]
        interval: Option<String>,
    },
    /// Display the beta of a ticker
    Beta {
        #[arg(short, long)]
        ticker: String,
    },
    /// Display market observations and the derived return rate
    Observations {
        #[arg(long)]
        series_id: Option<String>,
    },
    /// Display the price trend of a ticker
    Trend {
        #[arg(short, long)]
        ticker: String,
        #[arg(long)]
        range: Option<String>,
        #[arg(long)]
        interval: Option<String>,
    },
    /// List well-known mutual funds
    Funds,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => mfcalc::cli::setup::setup(),
        Some(cmd) => mfcalc::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
