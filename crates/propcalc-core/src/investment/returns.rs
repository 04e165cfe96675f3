//! Rental investment yield ratios and the 10-year compounded projection.
//!
//! Ratios with a potentially-zero denominator (and the fractional-power
//! annualized return) are reported as tagged [`Metric`] values: a single
//! undefined metric never poisons the rest of the summary, and consumers
//! never see NaN or Infinity.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PropCalcError;
use crate::rounding::{round_pct, round_unit};
use crate::types::{with_metadata, ComputationOutput, Metric, Money, Rate};
use crate::PropCalcResult;

/// Fixed projection horizon for appreciation and cumulative return.
const PROJECTION_YEARS: u32 = 10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for an investment evaluation. All monetary fields are
/// in the smallest currency unit; rates are decimal fractions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentInput {
    /// Acquisition price of the property
    pub purchase_price: Money,
    /// One-off renovation / fit-out cost
    pub renovation_cost: Money,
    /// Expected monthly rental income
    pub monthly_rent: Money,
    /// Monthly building management fee
    pub monthly_management_fee: Money,
    /// Annual property tax
    pub annual_property_tax: Money,
    /// Annual insurance premium
    pub annual_insurance: Money,
    /// Monthly mortgage debt service
    pub monthly_mortgage_payment: Money,
    /// Expected vacancy and collection loss (0.05 = 5%)
    pub vacancy_rate: Rate,
    /// Expected annual price appreciation (0.02 = 2%)
    pub appreciation_rate: Rate,
}

/// One annualized expense component. The breakdown always sums to
/// `total_expenses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub category: String,
    pub amount: Money,
}

/// Compounded appreciation projection over [`PROJECTION_YEARS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Property value after the projection horizon
    pub future_value: Money,
    /// Cumulative return on total investment, as a percentage
    pub total_return_pct: Metric,
    /// Geometric mean annual return, as a percentage
    pub annualized_return_pct: Metric,
}

/// Complete investment evaluation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentOutput {
    /// Purchase price plus renovation cost
    pub total_investment: Money,
    /// Gross annual rent before vacancy
    pub annual_rent: Money,
    /// Annual rent after vacancy loss
    pub effective_rent: Money,
    /// Sum of all annualized expenses (including mortgage)
    pub total_expenses: Money,
    /// Effective rent minus total expenses
    pub net_income: Money,
    pub monthly_net_income: Money,
    /// Annual rent / purchase price
    pub gross_yield_pct: Metric,
    /// Net income / purchase price
    pub net_yield_pct: Metric,
    /// Net income / total investment
    pub cash_on_cash_pct: Metric,
    /// Operating income (excluding debt service) / purchase price.
    /// Financing-independent by construction.
    pub cap_rate_pct: Metric,
    /// Years of net income needed to recover the total investment
    pub break_even_years: Metric,
    pub projection: Projection,
    /// Annualized components of `total_expenses`
    pub expense_breakdown: Vec<ExpenseItem>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate a rental property investment: income statement, yield ratios,
/// and the 10-year appreciation projection.
pub fn evaluate_investment(
    input: &InvestmentInput,
) -> PropCalcResult<ComputationOutput<InvestmentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input, &mut warnings)?;

    // --- Income statement (annualized) ---
    let total_investment = input.purchase_price + input.renovation_cost;
    let annual_rent = input.monthly_rent * dec!(12);
    let effective_rent = annual_rent * (Decimal::ONE - input.vacancy_rate);

    let management = input.monthly_management_fee * dec!(12);
    let mortgage = input.monthly_mortgage_payment * dec!(12);
    let operating_expenses = management + input.annual_property_tax + input.annual_insurance;
    let total_expenses = operating_expenses + mortgage;
    let net_income = effective_rent - total_expenses;

    if net_income < Decimal::ZERO {
        warnings.push(format!(
            "Net income is negative ({}) — rent does not cover expenses",
            round_unit(net_income)
        ));
    }

    // --- Yield ratios ---
    let gross_yield_pct = pct_metric(annual_rent, input.purchase_price);
    let net_yield_pct = pct_metric(net_income, input.purchase_price);
    let cash_on_cash_pct = pct_metric(net_income, total_investment);
    // Cap rate excludes debt service: it measures the asset, not the financing
    let cap_rate_pct = pct_metric(effective_rent - operating_expenses, input.purchase_price);

    let break_even_years = if net_income <= Decimal::ZERO {
        Metric::Undefined
    } else {
        Metric::ratio(total_investment, net_income).map(round_pct)
    };

    note_undefined(&mut warnings, "gross_yield_pct", &gross_yield_pct, "purchase price is zero");
    note_undefined(&mut warnings, "net_yield_pct", &net_yield_pct, "purchase price is zero");
    note_undefined(&mut warnings, "cap_rate_pct", &cap_rate_pct, "purchase price is zero");
    note_undefined(
        &mut warnings,
        "cash_on_cash_pct",
        &cash_on_cash_pct,
        "total investment is zero",
    );
    note_undefined(
        &mut warnings,
        "break_even_years",
        &break_even_years,
        "net income is not positive",
    );

    // --- Projection ---
    let projection = project(input, total_investment, net_income, &mut warnings);

    let expense_breakdown = vec![
        ExpenseItem {
            category: "management_fee".into(),
            amount: round_unit(management),
        },
        ExpenseItem {
            category: "mortgage".into(),
            amount: round_unit(mortgage),
        },
        ExpenseItem {
            category: "property_tax".into(),
            amount: round_unit(input.annual_property_tax),
        },
        ExpenseItem {
            category: "insurance".into(),
            amount: round_unit(input.annual_insurance),
        },
    ];

    let output = InvestmentOutput {
        total_investment,
        annual_rent: round_unit(annual_rent),
        effective_rent: round_unit(effective_rent),
        total_expenses: round_unit(total_expenses),
        net_income: round_unit(net_income),
        monthly_net_income: round_unit(net_income / dec!(12)),
        gross_yield_pct,
        net_yield_pct,
        cash_on_cash_pct,
        cap_rate_pct,
        break_even_years,
        projection,
        expense_breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Rental Investment Return Analysis",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &InvestmentInput, warnings: &mut Vec<String>) -> PropCalcResult<()> {
    let monetary = [
        ("purchase_price", input.purchase_price),
        ("renovation_cost", input.renovation_cost),
        ("monthly_rent", input.monthly_rent),
        ("monthly_management_fee", input.monthly_management_fee),
        ("annual_property_tax", input.annual_property_tax),
        ("annual_insurance", input.annual_insurance),
        ("monthly_mortgage_payment", input.monthly_mortgage_payment),
    ];

    for (field, value) in monetary {
        if value < Decimal::ZERO {
            return Err(PropCalcError::InvalidInput {
                field: field.into(),
                reason: "Monetary amounts must be non-negative".into(),
            });
        }
    }

    if input.vacancy_rate < Decimal::ZERO || input.vacancy_rate >= Decimal::ONE {
        return Err(PropCalcError::InvalidInput {
            field: "vacancy_rate".into(),
            reason: "Vacancy rate must be between 0 and 1 (exclusive upper)".into(),
        });
    }

    if input.appreciation_rate < Decimal::ZERO {
        return Err(PropCalcError::InvalidInput {
            field: "appreciation_rate".into(),
            reason: "Appreciation rate must be non-negative".into(),
        });
    }

    if input.vacancy_rate > dec!(0.15) {
        warnings.push(format!(
            "Vacancy rate {:.1}% exceeds 15% — above typical market norms",
            input.vacancy_rate * dec!(100)
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

fn project(
    input: &InvestmentInput,
    total_investment: Money,
    net_income: Money,
    warnings: &mut Vec<String>,
) -> Projection {
    let horizon = Decimal::from(PROJECTION_YEARS);
    let growth = (Decimal::ONE + input.appreciation_rate).powu(PROJECTION_YEARS as u64);
    let future_value = input.purchase_price * growth;

    let total_return_pct = Metric::ratio(
        future_value + net_income * horizon - total_investment,
        total_investment,
    )
    .map(|r| r * dec!(100));

    let annualized_return_pct = match total_return_pct {
        Metric::Undefined => Metric::Undefined,
        Metric::Defined(total_pct) => annualize(total_pct, warnings),
    };

    note_undefined(
        warnings,
        "total_return_pct",
        &total_return_pct,
        "total investment is zero",
    );

    Projection {
        future_value: round_unit(future_value),
        total_return_pct: total_return_pct.map(round_pct),
        annualized_return_pct,
    }
}

/// Geometric mean of a cumulative return: ((1 + total/100)^(1/N) - 1) * 100.
///
/// A total loss beyond 100% leaves a negative base under the fractional
/// power; the metric is reported undefined rather than as NaN.
fn annualize(total_return_pct: Decimal, warnings: &mut Vec<String>) -> Metric {
    let base = Decimal::ONE + total_return_pct / dec!(100);

    if base < Decimal::ZERO {
        warnings.push(
            "annualized_return_pct is undefined: cumulative loss exceeds 100%".into(),
        );
        return Metric::Undefined;
    }

    if base.is_zero() {
        return Metric::Defined(dec!(-100));
    }

    let exponent = Decimal::ONE / Decimal::from(PROJECTION_YEARS);
    Metric::Defined(round_pct((base.powd(exponent) - Decimal::ONE) * dec!(100)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// numerator / denominator as a rounded percentage Metric.
fn pct_metric(numerator: Decimal, denominator: Decimal) -> Metric {
    Metric::ratio(numerator, denominator).map(|r| round_pct(r * dec!(100)))
}

fn note_undefined(warnings: &mut Vec<String>, name: &str, metric: &Metric, reason: &str) {
    if !metric.is_defined() {
        warnings.push(format!("{name} is undefined: {reason}"));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
