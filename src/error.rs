use thiserror::Error;

#[derive(Error, Debug)]
pub enum GpError {
    #[error("Structural error: {0}")]
    Structural(String),

    #[error("Parse error at token {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Random sequence exhausted after {consumed} draws")]
    ExhaustedSequence { consumed: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl GpError {
    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        GpError::Parse {
            position,
            message: message.into(),
        }
    }
}

/// Raised when crossover is asked to split a control that is a bare terminal.
pub const OPERATION_OVER_INDIVIDUAL_FAIL: &str = "OperationOverIndividualFail";

pub type Result<T> = std::result::Result<T, GpError>;
