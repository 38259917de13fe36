//! Error types for the storefront client.

use thiserror::Error;

/// Failure talking to the catalog backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),

    /// Backend answered with `success: false` or a non-JSON error status.
    #[error("catalog API error: {message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    #[error("failed to decode catalog response: {0}")]
    Decode(String),
}

impl CatalogError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    /// HTTP status of the failed call, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

/// Login/signup failures, phrased for the person at the keyboard.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("No account found with this email")]
    UnknownUser,

    #[error("Incorrect password. Please try again")]
    WrongPassword,

    #[error("{0}")]
    Rejected(String),

    #[error("Failed to connect to the server")]
    Network(String),
}

impl AuthError {
    /// Map the backend's `error` string onto a specific failure.
    pub(crate) fn from_api_message(message: &str) -> Self {
        match message.trim() {
            "User not found" => Self::UnknownUser,
            "Invalid credentials" => Self::WrongPassword,
            "" => Self::Rejected("Request was rejected".to_string()),
            other => Self::Rejected(other.to_string()),
        }
    }
}

impl From<CatalogError> for AuthError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Api { message, .. } => Self::from_api_message(&message),
            CatalogError::Network(e) => Self::Network(e),
            CatalogError::Decode(e) => Self::Rejected(format!("Unexpected server response: {}", e)),
        }
    }
}

/// Fetching an image for sharing failed. Never fatal to a share.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("no image URL to download")]
    MissingUrl,

    #[error("invalid image URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("image download failed: {0}")]
    Network(String),

    #[error("image download returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to write image to cache: {0}")]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }
}

/// The platform share primitive failed.
#[derive(Debug, Error)]
pub enum PlatformShareError {
    #[error("share failed: {0}")]
    Failed(String),

    #[error("share I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Selection indices that do not fit the loaded product.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("color index {index} out of range (product has {len} colors)")]
    ColorOutOfRange { index: usize, len: usize },

    #[error("image index {index} out of range (color {color} has {len} images)")]
    ImageOutOfRange { color: usize, index: usize, len: usize },

    #[error("no photos selected")]
    NoSelection,
}

/// Errors a share invocation reports to its caller.
///
/// Download and platform failures are absorbed by the flow and only show up
/// in the returned outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShareError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
}
