//! Loan amortization schedule generation.
//!
//! Two repayment methods:
//! - **Equal payment** (amortizing annuity): constant monthly payment,
//!   interest-heavy early, principal-heavy late.
//! - **Equal principal**: constant principal portion, payment declines as
//!   the outstanding balance shrinks.
//!
//! An optional interest-only grace period defers principal repayment; the
//! amortizing phase then runs over the remaining months.
//!
//! All arithmetic uses `rust_decimal::Decimal`. Internal iteration is
//! unrounded; rows and summary figures are rounded to whole currency
//! units only when assembled.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PropCalcError;
use crate::rounding::{round_pct, round_unit, UNIT_TOLERANCE};
use crate::types::{with_metadata, ComputationOutput, Metric, Money, Rate};
use crate::PropCalcResult;

const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Repayment method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentMethod {
    /// Constant total payment every month (amortizing annuity)
    EqualPayment,
    /// Constant principal portion every month
    EqualPrincipal,
}

/// Input parameters for an amortization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    /// Total property price
    pub house_price: Money,
    /// Up-front payment; loan principal = house_price - down_payment
    pub down_payment: Money,
    /// Annual interest rate as a decimal (0.0206 = 2.06%)
    pub annual_rate: Rate,
    /// Loan term in years
    pub term_years: u32,
    /// Interest-only years before amortization begins
    #[serde(default)]
    pub grace_period_years: u32,
    /// Repayment method
    pub method: RepaymentMethod,
}

/// One reported row of the repayment schedule. Values are rounded to
/// whole currency units for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based month sequence
    pub month: u32,
    /// Calendar year of the loan (= ceil(month / 12))
    pub year: u32,
    /// Total payment due this month
    pub payment: Money,
    /// Portion of the payment reducing principal
    pub principal_portion: Money,
    /// Portion of the payment covering interest
    pub interest_portion: Money,
    /// Outstanding principal after this month's payment
    pub remaining_principal: Money,
}

/// Aggregate figures for the full loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageSummary {
    /// Principal borrowed
    pub loan_amount: Money,
    /// Sum of all payments over the term
    pub total_payment: Money,
    /// Sum of all interest over the term
    pub total_interest: Money,
    /// Interest as a percentage of total payment
    pub interest_share_pct: Metric,
    /// Constant monthly payment (equal-payment method only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<Money>,
    /// First amortizing month's payment (equal-principal method only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_month_payment: Option<Money>,
    /// Final month's payment (equal-principal method only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_month_payment: Option<Money>,
}

/// Complete amortization output: summary plus the sampled schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageOutput {
    pub summary: MortgageSummary,
    /// Months 1-12 and every 12th month thereafter. Sampling only reduces
    /// reporting volume; every month is still computed internally.
    pub entries: Vec<ScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate the full amortization schedule and aggregate totals for a
/// mortgage.
///
/// Iterates every month of the term with unrounded decimals and verifies
/// that the balance fully amortizes; a residual of one currency unit or
/// more is a `NumericDefect`.
pub fn amortize(input: &MortgageInput) -> PropCalcResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input, &mut warnings)?;

    let principal = input.house_price - input.down_payment;
    let total_months = input.term_years * MONTHS_PER_YEAR;
    let grace_months = input.grace_period_years * MONTHS_PER_YEAR;
    let amort_months = total_months - grace_months;
    let monthly_rate = input.annual_rate / dec!(12);

    let output = if principal.is_zero() {
        zero_principal_output(input, total_months)
    } else {
        run_schedule(
            input,
            principal,
            monthly_rate,
            total_months,
            grace_months,
            amort_months,
        )?
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        match input.method {
            RepaymentMethod::EqualPayment => "Loan Amortization (Equal Payment / Annuity)",
            RepaymentMethod::EqualPrincipal => "Loan Amortization (Equal Principal)",
        },
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &MortgageInput, warnings: &mut Vec<String>) -> PropCalcResult<()> {
    if input.house_price < Decimal::ZERO {
        return Err(PropCalcError::InvalidInput {
            field: "house_price".into(),
            reason: "House price must be non-negative".into(),
        });
    }

    if input.down_payment < Decimal::ZERO {
        return Err(PropCalcError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment must be non-negative".into(),
        });
    }

    if input.down_payment > input.house_price {
        return Err(PropCalcError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot exceed house price".into(),
        });
    }

    if input.annual_rate < Decimal::ZERO {
        return Err(PropCalcError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Annual rate must be non-negative".into(),
        });
    }

    if input.term_years == 0 {
        return Err(PropCalcError::InvalidInput {
            field: "term_years".into(),
            reason: "Loan term must be at least 1 year".into(),
        });
    }

    if input.grace_period_years >= input.term_years {
        return Err(PropCalcError::InvalidInput {
            field: "grace_period_years".into(),
            reason: "Grace period must be shorter than the loan term".into(),
        });
    }

    // --- Warnings for unusual terms ---
    let principal = input.house_price - input.down_payment;
    if !input.house_price.is_zero() {
        let ltv = principal / input.house_price;
        if ltv > dec!(0.80) {
            warnings.push(format!(
                "Loan-to-value of {:.1}% exceeds 80% — above typical bank lending limits",
                ltv * dec!(100)
            ));
        }
    }

    if input.annual_rate > dec!(0.10) {
        warnings.push(format!(
            "Annual rate {:.2}% exceeds 10% — verify rate input is a decimal fraction",
            input.annual_rate * dec!(100)
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Schedule iteration
// ---------------------------------------------------------------------------

fn run_schedule(
    input: &MortgageInput,
    principal: Money,
    monthly_rate: Rate,
    total_months: u32,
    grace_months: u32,
    amort_months: u32,
) -> PropCalcResult<MortgageOutput> {
    // Constant figures for the amortizing phase
    let annuity_payment = match input.method {
        RepaymentMethod::EqualPayment => {
            Some(equal_payment_amount(principal, monthly_rate, amort_months)?)
        }
        RepaymentMethod::EqualPrincipal => None,
    };
    let monthly_principal = principal / Decimal::from(amort_months);

    let mut remaining = principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_payment = Decimal::ZERO;
    let mut entries: Vec<ScheduleEntry> = Vec::new();

    for month in 1..=total_months {
        let interest = remaining * monthly_rate;

        let (payment, principal_portion) = if month <= grace_months {
            // Interest-only: balance untouched
            (interest, Decimal::ZERO)
        } else {
            match input.method {
                RepaymentMethod::EqualPayment => {
                    let pmt = annuity_payment.unwrap(); // set above for this method
                    (pmt, pmt - interest)
                }
                RepaymentMethod::EqualPrincipal => {
                    (monthly_principal + interest, monthly_principal)
                }
            }
        };

        remaining -= principal_portion;
        total_interest += interest;
        total_payment += payment;

        if is_reported(month) {
            entries.push(ScheduleEntry {
                month,
                year: (month + MONTHS_PER_YEAR - 1) / MONTHS_PER_YEAR,
                payment: round_unit(payment),
                principal_portion: round_unit(principal_portion),
                interest_portion: round_unit(interest),
                remaining_principal: round_unit(remaining),
            });
        }
    }

    if remaining.abs() >= UNIT_TOLERANCE {
        return Err(PropCalcError::NumericDefect(format!(
            "residual principal {remaining} after full amortization (expected < 1 unit)"
        )));
    }

    let summary = build_summary(
        input,
        principal,
        monthly_rate,
        monthly_principal,
        annuity_payment,
        total_payment,
        total_interest,
    );

    Ok(MortgageOutput { summary, entries })
}

fn build_summary(
    input: &MortgageInput,
    principal: Money,
    monthly_rate: Rate,
    monthly_principal: Money,
    annuity_payment: Option<Money>,
    total_payment: Money,
    total_interest: Money,
) -> MortgageSummary {
    let interest_share_pct = Metric::ratio(total_interest, total_payment)
        .map(|share| round_pct(share * dec!(100)));

    let (monthly_payment, first_month_payment, last_month_payment) = match input.method {
        RepaymentMethod::EqualPayment => (annuity_payment.map(round_unit), None, None),
        RepaymentMethod::EqualPrincipal => (
            None,
            // First amortizing month: full balance accrues interest
            Some(round_unit(monthly_principal + principal * monthly_rate)),
            // Last month: interest on the final remaining slice only
            Some(round_unit(monthly_principal + monthly_principal * monthly_rate)),
        ),
    };

    MortgageSummary {
        loan_amount: principal,
        total_payment: round_unit(total_payment),
        total_interest: round_unit(total_interest),
        interest_share_pct,
        monthly_payment,
        first_month_payment,
        last_month_payment,
    }
}

/// Annuity payment: P * r(1+r)^n / ((1+r)^n - 1). Zero rate degenerates
/// to straight-line P / n.
fn equal_payment_amount(
    principal: Money,
    monthly_rate: Rate,
    amort_months: u32,
) -> PropCalcResult<Money> {
    if amort_months == 0 {
        return Err(PropCalcError::DivisionByZero {
            context: "annuity payment with zero amortizing months".into(),
        });
    }

    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(amort_months));
    }

    // (1 + r)^n via iterative multiplication
    let mut compound = Decimal::ONE;
    for _ in 0..amort_months {
        compound *= Decimal::ONE + monthly_rate;
    }

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Err(PropCalcError::DivisionByZero {
            context: "annuity payment denominator".into(),
        });
    }

    Ok(principal * monthly_rate * compound / denominator)
}

/// Zero-principal loans produce an all-zero schedule rather than dividing
/// by zero anywhere.
fn zero_principal_output(input: &MortgageInput, total_months: u32) -> MortgageOutput {
    let entries = (1..=total_months)
        .filter(|&m| is_reported(m))
        .map(|month| ScheduleEntry {
            month,
            year: (month + MONTHS_PER_YEAR - 1) / MONTHS_PER_YEAR,
            payment: Decimal::ZERO,
            principal_portion: Decimal::ZERO,
            interest_portion: Decimal::ZERO,
            remaining_principal: Decimal::ZERO,
        })
        .collect();

    let (monthly_payment, first_month_payment, last_month_payment) = match input.method {
        RepaymentMethod::EqualPayment => (Some(Decimal::ZERO), None, None),
        RepaymentMethod::EqualPrincipal => (None, Some(Decimal::ZERO), Some(Decimal::ZERO)),
    };

    MortgageOutput {
        summary: MortgageSummary {
            loan_amount: Decimal::ZERO,
            total_payment: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            interest_share_pct: Metric::Undefined,
            monthly_payment,
            first_month_payment,
            last_month_payment,
        },
        entries,
    }
}

/// Reporting sample: every month in year one, then year-end months.
fn is_reported(month: u32) -> bool {
    month <= MONTHS_PER_YEAR || month % MONTHS_PER_YEAR == 0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
