use fireside_core::GameError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoplayError {
    #[error("game error: {0}")]
    Game(#[from] GameError),
    #[error("target index {index} out of range for {len} options")]
    InvalidTarget { index: usize, len: usize },
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for AutoplayError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for AutoplayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}
