//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("knowledge store error: {0}")]
    Knowledge(String),

    #[error("console error: {0}")]
    Console(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
