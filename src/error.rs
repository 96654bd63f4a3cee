//! Error types for webhook handling and release note accumulation.

use std::time::Duration;

use thiserror::Error;

/// Main error type for auto-release-notes operations.
#[derive(Error, Debug)]
pub enum ReleaseNotesError {
    // Webhook authentication errors
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Unexpected signature format: {0}")]
    MalformedSignature(String),

    #[error("Invalid signature: {0}")]
    SignatureMismatch(String),

    // Payload errors
    #[error("Unexpected webhook payload: {0}")]
    MalformedPayload(String),

    // Version errors
    #[error("Invalid version tag: {0}")]
    InvalidVersion(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Secret unavailable: {0}")]
    Secret(String),

    // Forge errors
    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    #[error("Forge operation timed out after {0:?}")]
    Timeout(Duration),

    // TOML parsing errors
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using ReleaseNotesError
pub type Result<T> = std::result::Result<T, ReleaseNotesError>;

impl ReleaseNotesError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a secret retrieval error
    pub fn secret(msg: impl Into<String>) -> Self {
        Self::Secret(msg.into())
    }

    /// True for failures that reject the caller rather than the payload.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::MethodNotAllowed(_)
                | Self::MalformedSignature(_)
                | Self::SignatureMismatch(_)
        )
    }
}

// Implement From for std::io::Error - wraps in Other variant for generic I/O errors
impl From<std::io::Error> for ReleaseNotesError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for ReleaseNotesError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("rate limit") =>
            {
                Self::RateLimitExceeded
            }
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}
