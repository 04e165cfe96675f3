mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::investment::InvestmentArgs;
use commands::mortgage::MortgageArgs;
use commands::scoring::{NormalizeWeightsArgs, ScoreArgs};

/// Property finance calculations with decimal precision
#[derive(Parser)]
#[command(
    name = "propcalc",
    version,
    about = "Property finance calculations with decimal precision",
    long_about = "A CLI for property finance calculations with decimal precision. \
                  Supports loan amortization schedules (equal-payment and \
                  equal-principal), rental investment return analysis, and \
                  scoring-weight utilities."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a loan amortization schedule
    Mortgage(MortgageArgs),
    /// Evaluate a rental property investment
    Investment(InvestmentArgs),
    /// Normalize a set of scoring weights to sum to 1
    NormalizeWeights(NormalizeWeightsArgs),
    /// Compute a weighted composite score
    Score(ScoreArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args),
        Commands::Investment(args) => commands::investment::run_investment(args),
        Commands::NormalizeWeights(args) => commands::scoring::run_normalize_weights(args),
        Commands::Score(args) => commands::scoring::run_score(args),
        Commands::Version => {
            println!("propcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
