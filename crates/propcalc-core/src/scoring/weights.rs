//! Scoring-weight normalization and weighted composite scores.
//!
//! Used wherever a set of feature weights is re-scaled after interactive
//! adjustment: the weights are divided by their sum so the result is
//! non-negative and sums to exactly 1 within representation tolerance.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::error::PropCalcError;
use crate::rounding::round_pct;
use crate::types::{with_metadata, ComputationOutput};
use crate::PropCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a weighted composite score: a 0-100 score per feature and a
/// (possibly unnormalized) weight per feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedScoreInput {
    pub scores: BTreeMap<String, Decimal>,
    pub weights: BTreeMap<String, Decimal>,
}

/// Contribution of one feature to the composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub feature: String,
    pub score: Decimal,
    /// Normalized weight applied to the score
    pub weight: Decimal,
    /// score * weight
    pub contribution: Decimal,
}

/// Weighted composite score output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedScoreOutput {
    /// Weighted average of the feature scores (0-100 for 0-100 inputs)
    pub composite_score: Decimal,
    /// Weights after normalization (sum to 1)
    pub normalized_weights: BTreeMap<String, Decimal>,
    pub contributions: Vec<FeatureContribution>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Rescale a set of weights so they sum to 1, preserving their relative
/// proportions.
///
/// Rejects empty input, negative entries, and an all-zero weight set —
/// the latter is an invalid configuration, not a division by zero.
pub fn normalize_weights(
    weights: &BTreeMap<String, Decimal>,
) -> PropCalcResult<BTreeMap<String, Decimal>> {
    if weights.is_empty() {
        return Err(PropCalcError::InvalidInput {
            field: "weights".into(),
            reason: "At least one weight is required".into(),
        });
    }

    for (key, value) in weights {
        if *value < Decimal::ZERO {
            return Err(PropCalcError::InvalidInput {
                field: format!("weights.{key}"),
                reason: "Weights must be non-negative".into(),
            });
        }
    }

    let total: Decimal = weights.values().copied().sum();
    if total.is_zero() {
        return Err(PropCalcError::InvalidInput {
            field: "weights".into(),
            reason: "At least one weight must be positive".into(),
        });
    }

    Ok(weights
        .iter()
        .map(|(key, value)| (key.clone(), value / total))
        .collect())
}

/// Compute a weighted composite of per-feature scores. Weights are
/// normalized first, so callers may pass raw slider values.
pub fn weighted_score(
    input: &WeightedScoreInput,
) -> PropCalcResult<ComputationOutput<WeightedScoreOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let normalized_weights = normalize_weights(&input.weights)?;

    let mut composite = Decimal::ZERO;
    let mut contributions = Vec::with_capacity(normalized_weights.len());

    for (feature, weight) in &normalized_weights {
        let score = match input.scores.get(feature) {
            Some(s) => *s,
            None => {
                return Err(PropCalcError::InvalidInput {
                    field: format!("scores.{feature}"),
                    reason: "Weighted feature has no score".into(),
                });
            }
        };

        if score < Decimal::ZERO || score > dec!(100) {
            warnings.push(format!(
                "Score for '{feature}' is {score} — outside the expected 0-100 range"
            ));
        }

        let contribution = score * weight;
        composite += contribution;

        contributions.push(FeatureContribution {
            feature: feature.clone(),
            score,
            weight: *weight,
            contribution,
        });
    }

    let output = WeightedScoreOutput {
        composite_score: round_pct(composite),
        normalized_weights,
        contributions,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Weighted Composite Score",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
