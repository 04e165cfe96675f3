use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use propcalc_core::mortgage::schedule::{self, MortgageInput, RepaymentMethod};

use crate::input;

#[derive(Debug, Clone, ValueEnum)]
pub enum MethodArg {
    EqualPayment,
    EqualPrincipal,
}

impl From<MethodArg> for RepaymentMethod {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::EqualPayment => RepaymentMethod::EqualPayment,
            MethodArg::EqualPrincipal => RepaymentMethod::EqualPrincipal,
        }
    }
}

/// Arguments for amortization schedule generation
#[derive(Args)]
pub struct MortgageArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Total property price
    #[arg(long)]
    pub house_price: Option<Decimal>,

    /// Up-front down payment
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate as a percentage (e.g. 2.06)
    #[arg(long)]
    pub rate_pct: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Interest-only grace period in years
    #[arg(long, default_value_t = 0)]
    pub grace_years: u32,

    /// Repayment method
    #[arg(long, value_enum, default_value = "equal-payment")]
    pub method: MethodArg,
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let house_price = args
            .house_price
            .ok_or("--house-price is required (or provide --input)")?;
        let down_payment = args
            .down_payment
            .ok_or("--down-payment is required (or provide --input)")?;
        let rate_pct = args
            .rate_pct
            .ok_or("--rate-pct is required (or provide --input)")?;
        let term_years = args
            .term_years
            .ok_or("--term-years is required (or provide --input)")?;

        MortgageInput {
            house_price,
            down_payment,
            annual_rate: rate_pct / dec!(100),
            term_years,
            grace_period_years: args.grace_years,
            method: args.method.into(),
        }
    };

    let result = schedule::amortize(&mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}
