#![cfg(feature = "mortgage")]

use propcalc_core::mortgage::schedule::{amortize, MortgageInput, RepaymentMethod};
use propcalc_core::types::Metric;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn input(
    house_price: Decimal,
    down_payment: Decimal,
    annual_rate: Decimal,
    term_years: u32,
    method: RepaymentMethod,
) -> MortgageInput {
    MortgageInput {
        house_price,
        down_payment,
        annual_rate,
        term_years,
        grace_period_years: 0,
        method,
    }
}

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn test_bank_reference_10m_20y() {
    // 10M loan at 1.31% over 20 years, equal payment.
    // Annuity formula gives 47,385.57/month; 240 payments total
    // 11,372,564, of which 1,372,564 is interest.
    let result = amortize(&input(
        dec!(10000000),
        dec!(0),
        dec!(0.0131),
        20,
        RepaymentMethod::EqualPayment,
    ))
    .unwrap();
    let summary = &result.result.summary;

    assert_eq!(summary.monthly_payment, Some(dec!(47386)));
    assert_eq!(summary.total_interest, dec!(1372564));
    assert_eq!(summary.total_payment - summary.total_interest, dec!(10000000));
}

#[test]
fn test_equal_principal_cheaper_in_interest() {
    // Principal is retired faster under equal-principal, so total
    // interest is strictly lower than the annuity for any positive rate.
    let annuity = amortize(&input(
        dec!(10000000),
        dec!(0),
        dec!(0.0131),
        20,
        RepaymentMethod::EqualPayment,
    ))
    .unwrap();
    let straight = amortize(&input(
        dec!(10000000),
        dec!(0),
        dec!(0.0131),
        20,
        RepaymentMethod::EqualPrincipal,
    ))
    .unwrap();

    assert_eq!(straight.result.summary.total_interest, dec!(1315458));
    assert!(
        straight.result.summary.total_interest < annuity.result.summary.total_interest
    );
}

#[test]
fn test_grace_period_costs_more_interest() {
    // Deferring principal for two years accrues full-balance interest
    // for 24 months and amortizes over the remaining 336.
    let without = amortize(&input(
        dec!(15000000),
        dec!(3000000),
        dec!(0.0206),
        30,
        RepaymentMethod::EqualPayment,
    ))
    .unwrap();

    let mut with_grace_input = input(
        dec!(15000000),
        dec!(3000000),
        dec!(0.0206),
        30,
        RepaymentMethod::EqualPayment,
    );
    with_grace_input.grace_period_years = 2;
    let with_grace = amortize(&with_grace_input).unwrap();

    assert_eq!(without.result.summary.total_interest, dec!(4097491));
    assert_eq!(with_grace.result.summary.total_interest, dec!(4296084));
    assert_eq!(
        with_grace.result.summary.monthly_payment,
        Some(dec!(47029))
    );
}

// ===========================================================================
// Schedule structure
// ===========================================================================

#[test]
fn test_year_assignment() {
    let result = amortize(&input(
        dec!(10000000),
        dec!(0),
        dec!(0.0131),
        20,
        RepaymentMethod::EqualPayment,
    ))
    .unwrap();

    for entry in &result.result.entries {
        assert_eq!(entry.year, entry.month.div_ceil(12));
    }
}

#[test]
fn test_interest_declines_principal_grows() {
    // Annuity: interest portion falls month over month, principal rises
    let result = amortize(&input(
        dec!(10000000),
        dec!(0),
        dec!(0.0131),
        20,
        RepaymentMethod::EqualPayment,
    ))
    .unwrap();
    let entries = &result.result.entries;

    for pair in entries.windows(2) {
        assert!(pair[1].interest_portion <= pair[0].interest_portion);
        assert!(pair[1].principal_portion >= pair[0].principal_portion);
        assert!(pair[1].remaining_principal < pair[0].remaining_principal);
    }
}

#[test]
fn test_interest_share_matches_totals() {
    let result = amortize(&input(
        dec!(10000000),
        dec!(0),
        dec!(0.0131),
        20,
        RepaymentMethod::EqualPayment,
    ))
    .unwrap();
    let summary = &result.result.summary;

    match summary.interest_share_pct {
        Metric::Defined(share) => {
            // 1,372,564 / 11,372,564 ≈ 12.07%
            assert_eq!(share, dec!(12.07));
        }
        Metric::Undefined => panic!("interest share should be defined"),
    }
}

// ===========================================================================
// Wire format
// ===========================================================================

#[test]
fn test_input_deserializes_from_snake_case() {
    let json = r#"{
        "house_price": "15000000",
        "down_payment": "3000000",
        "annual_rate": "0.0206",
        "term_years": 30,
        "method": "equal_principal"
    }"#;
    let parsed: MortgageInput = serde_json::from_str(json).unwrap();

    assert_eq!(parsed.method, RepaymentMethod::EqualPrincipal);
    assert_eq!(parsed.grace_period_years, 0); // defaulted
    assert!(amortize(&parsed).is_ok());
}

#[test]
fn test_output_entries_serialize_rounded() {
    let result = amortize(&input(
        dec!(10000000),
        dec!(0),
        dec!(0.0131),
        20,
        RepaymentMethod::EqualPayment,
    ))
    .unwrap();
    let json = serde_json::to_value(&result.result).unwrap();

    let first = &json["entries"][0];
    // serde-with-str: decimals serialize as strings, whole units only
    let payment = first["payment"].as_str().unwrap();
    assert!(!payment.contains('.'), "unrounded payment {payment}");
}
