use serde::Deserialize;
use thiserror::Error;

/// Error payload returned by the service on any failing call.
///
/// The API reports every rejection as a single human-readable message.
/// Note that nonexistent, already-consumed, and wrong-passphrase secrets
/// all come back as "Unknown secret"; the service does not distinguish
/// them, and neither do we.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
#[error("{message}")]
pub struct ApiError {
    /// The message as the service phrased it.
    pub message: String,
}

/// All errors that can occur in the onetimesecret client and CLI.
#[derive(Debug, Error)]
pub enum OtsError {
    // --- Service errors ---
    #[error(transparent)]
    Api(#[from] ApiError),

    // --- Transport errors ---
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    // --- Decoding errors ---
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for onetimesecret results.
pub type Result<T> = std::result::Result<T, OtsError>;
