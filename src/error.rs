//! Error types for PetroSphere
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for PetroSphere operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, gateway calls, credential handling, and
/// media encoding/decoding.
#[derive(Error, Debug)]
pub enum PetrosphereError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Gateway call failures (transport, non-success status, malformed response)
    ///
    /// A failure is terminal for the one user action that issued it; the
    /// command layer surfaces a short human-readable message and the user's
    /// only recourse is to repeat the action.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Missing credentials for the model endpoint
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Authentication errors (e.g., 401 Unauthorized from the endpoint)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Input rejected before any network call (empty prompt, missing image)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Media handling errors (malformed data URI, undecodable image payload)
    #[error("Media error: {0}")]
    Media(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type alias for PetroSphere operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
