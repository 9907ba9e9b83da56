use thiserror::Error;

/// Failures of the likelihood estimator and of building its input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimatorError {
    #[error("Dataset does not contain sufficient '{positive}' or '{negative}' data.")]
    DataInsufficient {
        positive: String,
        negative: String,
        missing: String,
    },
    #[error("column '{0}' was not found in the dataset.")]
    UnknownColumn(String),
    #[error("no value was selected for column '{0}'.")]
    MissingAttribute(String),
    #[error("'{0}' is not an attribute column of the dataset.")]
    UnknownAttribute(String),
    #[error("column '{0}' was selected more than once.")]
    DuplicateAttribute(String),
    #[error("expected COLUMN=VALUE, got '{0}'.")]
    MalformedAssignment(String),
}
