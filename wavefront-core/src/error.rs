use thiserror::Error;

/// Validation failure for a [`crate::Config`].
///
/// Every out-of-range field is collected into a single message rather than
/// reporting only the first offender, so a caller correcting a config file
/// sees every problem at once.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(pub String);

/// Error surfaced by [`crate::analyze`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("unknown reference signal: {0}")]
    UnknownSignal(String),

    #[error("invalid recording: {0}")]
    InvalidRecording(String),

    #[error("{0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("numeric failure: {0}")]
    NumericFailure(String),
}
