//! The Proportion defect-origin heuristic: estimating which release
//! introduced a defect when the tracker does not say so.

pub mod cold_start;
pub mod estimator;

pub use cold_start::compute_cold_start_p;
pub use estimator::ProportionEstimator;
