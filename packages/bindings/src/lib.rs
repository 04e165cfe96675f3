use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Mortgage
// ---------------------------------------------------------------------------

#[napi]
pub fn amortize(input_json: String) -> NapiResult<String> {
    let input: propcalc_core::mortgage::schedule::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        propcalc_core::mortgage::schedule::amortize(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_investment(input_json: String) -> NapiResult<String> {
    let input: propcalc_core::investment::returns::InvestmentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = propcalc_core::investment::returns::evaluate_investment(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[napi]
pub fn normalize_weights(weights_json: String) -> NapiResult<String> {
    let weights: std::collections::BTreeMap<String, rust_decimal::Decimal> =
        serde_json::from_str(&weights_json).map_err(to_napi_error)?;
    let normalized =
        propcalc_core::scoring::weights::normalize_weights(&weights).map_err(to_napi_error)?;
    serde_json::to_string(&normalized).map_err(to_napi_error)
}

#[napi]
pub fn weighted_score(input_json: String) -> NapiResult<String> {
    let input: propcalc_core::scoring::weights::WeightedScoreInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        propcalc_core::scoring::weights::weighted_score(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
