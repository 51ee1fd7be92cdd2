pub mod benchmarks;
pub mod error;
pub mod types;

#[cfg(feature = "estimator")]
pub mod estimator;

#[cfg(feature = "profiles")]
pub mod profiles;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

pub use error::BenchGapError;
pub use types::*;

/// Standard result type for all benchgap operations
pub type BenchGapResult<T> = Result<T, BenchGapError>;
