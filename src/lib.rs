//! Estimates the likelihood of heart disease from categorical attributes by
//! multiplying per-attribute conditional frequencies drawn from a dataset.

pub mod batch;
pub mod bayes;
pub mod dataset;
pub mod error;
pub mod prompt;
pub mod report;
pub mod selection;

pub use bayes::{EstimatorConfig, LikelihoodEstimator, Outcome, Prediction};
pub use dataset::Dataset;
pub use error::EstimatorError;
pub use selection::AttributeSelection;
