use thiserror::Error;

use crate::coordinator::RecognizerId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GestureError {
    #[error("unknown gesture recognizer {0}")]
    UnknownRecognizer(RecognizerId),
    #[error("touch index {index} out of range (touch count {count})")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("recognizer {0} does not hold the requested strategy type")]
    StrategyMismatch(RecognizerId),
    #[error("invalid {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, GestureError>;
