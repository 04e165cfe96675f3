use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values, in the smallest reporting currency unit.
/// Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// A derived metric that may have no mathematical meaning for the given
/// inputs (zero denominator, negative base under a fractional power).
/// Serializes with an explicit status tag so consumers never see NaN or
/// Infinity for an undefined value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Metric {
    Defined(Decimal),
    Undefined,
}

impl Metric {
    /// Divide `numerator / denominator`, yielding `Undefined` when the
    /// denominator is zero.
    pub fn ratio(numerator: Decimal, denominator: Decimal) -> Metric {
        if denominator.is_zero() {
            Metric::Undefined
        } else {
            Metric::Defined(numerator / denominator)
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Metric::Defined(_))
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            Metric::Defined(v) => Some(*v),
            Metric::Undefined => None,
        }
    }

    /// Apply `f` to a defined value, passing `Undefined` through.
    pub fn map(self, f: impl FnOnce(Decimal) -> Decimal) -> Metric {
        match self {
            Metric::Defined(v) => Metric::Defined(f(v)),
            Metric::Undefined => Metric::Undefined,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
