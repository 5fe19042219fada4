use gesture::GestureError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigatorError {
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
    #[error("invalid {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error(transparent)]
    Gesture(#[from] GestureError),
}

pub type Result<T> = std::result::Result<T, NavigatorError>;
