//! Custom error types for DeepL operations

use thiserror::Error;
use tracing::debug;

use crate::core::models::RemoteError;

/// DeepL client errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Non-2xx response carrying a structured error body
    #[error("API error: {status} - {error}")]
    ApiError {
        status: u16,
        error: RemoteError,
    },

    /// The remote job reached the `error` status
    #[error("Document {document_id} failed: {error}")]
    DocumentFailed {
        document_id: String,
        error: RemoteError,
    },

    /// The caller cancelled the workflow
    #[error("Operation cancelled by caller")]
    Cancelled,

    /// Document extension outside the supported set
    #[error("Invalid extension: {path}")]
    InvalidExtension {
        path: String,
    },

    /// Text translation called with empty text
    #[error("Text must not be empty")]
    EmptyText,

    /// Text translation called without a target language
    #[error("Target language must be set")]
    MissingTargetLanguage,

    /// File operation error
    #[error("File error: {path} - {message}")]
    FileError {
        path: String,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// Wrapper for anyhow errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TranslationError {
    /// True when the error came from the caller's cancellation token
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TranslationError::Cancelled)
    }

    /// Remote error payload, if this error carries one
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            TranslationError::ApiError { error, .. } => Some(error),
            TranslationError::DocumentFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for TranslationError {
    fn from(err: anyhow::Error) -> Self {
        TranslationError::InternalError(err.to_string())
    }
}

/// Turn a non-2xx response into an error.
///
/// The body must decode as `{message, detail}`; if it does not, the decode
/// failure itself is returned since the remote error cannot be reported.
pub async fn decode_error_response(response: reqwest::Response) -> TranslationError {
    let status = response.status().as_u16();
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => return TranslationError::HttpError(e),
    };

    decode_error_body(status, &body)
}

pub(crate) fn decode_error_body(status: u16, body: &[u8]) -> TranslationError {
    match serde_json::from_slice::<RemoteError>(body) {
        Ok(error) => {
            debug!("Remote error {}: {}", status, error);
            TranslationError::ApiError { status, error }
        }
        Err(e) => TranslationError::JsonError(e),
    }
}

/// Result type for DeepL operations
pub type Result<T> = std::result::Result<T, TranslationError>;
