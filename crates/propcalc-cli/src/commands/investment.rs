use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use propcalc_core::investment::returns::{self, InvestmentInput};

use crate::input;

/// Arguments for rental investment evaluation
#[derive(Args)]
pub struct InvestmentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Acquisition price of the property
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// One-off renovation cost
    #[arg(long, default_value = "0")]
    pub renovation_cost: Decimal,

    /// Expected monthly rent
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Monthly management fee
    #[arg(long, default_value = "0")]
    pub management_fee: Decimal,

    /// Annual property tax
    #[arg(long, default_value = "0")]
    pub property_tax: Decimal,

    /// Annual insurance premium
    #[arg(long, default_value = "0")]
    pub insurance: Decimal,

    /// Monthly mortgage payment
    #[arg(long, default_value = "0")]
    pub mortgage_payment: Decimal,

    /// Vacancy rate as a percentage (e.g. 5)
    #[arg(long, default_value = "0")]
    pub vacancy_pct: Decimal,

    /// Annual appreciation as a percentage (e.g. 2)
    #[arg(long, default_value = "0")]
    pub appreciation_pct: Decimal,
}

pub fn run_investment(args: InvestmentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let investment_input: InvestmentInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let purchase_price = args
            .purchase_price
            .ok_or("--purchase-price is required (or provide --input)")?;
        let monthly_rent = args
            .monthly_rent
            .ok_or("--monthly-rent is required (or provide --input)")?;

        InvestmentInput {
            purchase_price,
            renovation_cost: args.renovation_cost,
            monthly_rent,
            monthly_management_fee: args.management_fee,
            annual_property_tax: args.property_tax,
            annual_insurance: args.insurance,
            monthly_mortgage_payment: args.mortgage_payment,
            vacancy_rate: args.vacancy_pct / dec!(100),
            appreciation_rate: args.appreciation_pct / dec!(100),
        }
    };

    let result = returns::evaluate_investment(&investment_input)?;
    Ok(serde_json::to_value(result)?)
}
