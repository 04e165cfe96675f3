//! Display-boundary rounding and the numeric tolerances shared by the
//! calculation modules.
//!
//! Internal schedule iteration always accumulates unrounded `Decimal`
//! values; rounding to whole currency units happens exactly once, when a
//! result row or summary figure is assembled.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// One whole currency unit. Residual principal after a complete
/// amortization run must fall below this.
pub const UNIT_TOLERANCE: Decimal = Decimal::ONE;

/// Tolerance for quantities that must reconcile exactly up to
/// representation error (normalized weight sums).
pub const SUM_TOLERANCE: Decimal = dec!(0.000000001);

/// Round to the nearest whole currency unit (midpoint away from zero).
pub fn round_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a percentage or ratio for reporting (2 decimal places).
pub fn round_pct(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
