pub mod benchmarks;
pub mod demo;
pub mod estimate;
pub mod sweep;
