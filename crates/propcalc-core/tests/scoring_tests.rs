#![cfg(feature = "scoring")]

use propcalc_core::scoring::weights::{normalize_weights, weighted_score, WeightedScoreInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

fn map(pairs: &[(&str, Decimal)]) -> BTreeMap<String, Decimal> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

/// The eight supplier-scoring features with their default weights
fn supplier_weights() -> BTreeMap<String, Decimal> {
    map(&[
        ("quality", dec!(0.25)),
        ("price", dec!(0.20)),
        ("reliability", dec!(0.15)),
        ("customization", dec!(0.10)),
        ("communication", dec!(0.10)),
        ("geography", dec!(0.05)),
        ("experience", dec!(0.10)),
        ("certifications", dec!(0.05)),
    ])
}

#[test]
fn test_supplier_weight_set_normalizes_to_one() {
    // Already sums to 1: normalization is the identity
    let normalized = normalize_weights(&supplier_weights()).unwrap();
    let total: Decimal = normalized.values().copied().sum();

    assert_eq!(total, Decimal::ONE);
    assert_eq!(normalized["quality"], dec!(0.25));
}

#[test]
fn test_slider_adjustment_rescales() {
    // Interactive adjustment pushed quality to 0.40 without touching the
    // rest; the set now sums to 1.15 and must be rescaled
    let mut adjusted = supplier_weights();
    adjusted.insert("quality".into(), dec!(0.40));

    let normalized = normalize_weights(&adjusted).unwrap();
    let total: Decimal = normalized.values().copied().sum();

    assert!((total - Decimal::ONE).abs() < dec!(0.000000001));
    // Relative order is preserved
    assert!(normalized["quality"] > normalized["price"]);
    assert!(normalized["price"] > normalized["geography"]);
}

#[test]
fn test_composite_score_full_feature_set() {
    let scores = map(&[
        ("quality", dec!(90)),
        ("price", dec!(70)),
        ("reliability", dec!(85)),
        ("customization", dec!(60)),
        ("communication", dec!(80)),
        ("geography", dec!(50)),
        ("experience", dec!(75)),
        ("certifications", dec!(95)),
    ]);
    let input = WeightedScoreInput {
        scores,
        weights: supplier_weights(),
    };
    let result = weighted_score(&input).unwrap();
    let out = &result.result;

    // 90*.25 + 70*.20 + 85*.15 + 60*.10 + 80*.10 + 50*.05 + 75*.10 + 95*.05
    assert_eq!(out.composite_score, dec!(78.50));
    assert_eq!(out.contributions.len(), 8);

    let contribution_sum: Decimal = out.contributions.iter().map(|c| c.contribution).sum();
    assert_eq!(contribution_sum, out.composite_score);
}

#[test]
fn test_composite_bounded_by_extremes() {
    let scores = map(&[("a", dec!(40)), ("b", dec!(90))]);
    let input = WeightedScoreInput {
        scores,
        weights: map(&[("a", dec!(7)), ("b", dec!(3))]),
    };
    let result = weighted_score(&input).unwrap();
    let composite = result.result.composite_score;

    assert!(composite >= dec!(40) && composite <= dec!(90));
    assert_eq!(composite, dec!(55));
}
