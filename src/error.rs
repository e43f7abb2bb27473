use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Hero data is not loaded yet")]
    NotReady,

    #[error("Unknown hero: {0}")]
    UnknownHero(String),

    #[error("Unknown hero role tag: {0}")]
    UnknownRole(String),

    #[error("Unknown lane position: {0}")]
    UnknownPosition(String),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
