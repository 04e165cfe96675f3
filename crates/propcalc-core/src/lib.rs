pub mod error;
pub mod rounding;
pub mod types;

#[cfg(feature = "mortgage")]
pub mod mortgage;

#[cfg(feature = "investment")]
pub mod investment;

#[cfg(feature = "scoring")]
pub mod scoring;

pub use error::PropCalcError;
pub use types::*;

/// Standard result type for all propcalc operations
pub type PropCalcResult<T> = Result<T, PropCalcError>;
