/// Error types for the cat pipeline
///
/// Each stage gets its own enum so the controller can log exactly what went
/// wrong, even though the UI only ever sees a success flag.
use thiserror::Error;

/// Failure while asking the cat API for a new image location.
///
/// Cloneable because it travels inside UI messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("could not reach the cat service: {0}")]
    Network(String),

    #[error("cat service answered with status {0}")]
    Status(u16),

    #[error("cat service returned no images")]
    EmptyResponse,

    #[error("unexpected response from the cat service: {0}")]
    InvalidResponse(String),
}

/// Failure somewhere between "we have a URL" and "the bytes are on disk".
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("download failed: {0}")]
    Network(String),

    #[error("download answered with status {0}")]
    Status(u16),

    #[error("downloaded data is not a recognised image format")]
    NotAnImage,

    #[error("could not write image: {0}")]
    Storage(#[from] std::io::Error),
}

/// Failure while reading or writing the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("settings could not be written as JSON: {0}")]
    Serialize(#[source] serde_json::Error),
}
