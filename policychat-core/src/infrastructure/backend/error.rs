//! Dispatch errors and their user-facing rendering

use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Why a file was refused before any request was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    NotPdf,
    TooLarge { limit_mb: u64 },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::NotPdf => f.write_str("not a PDF file"),
            ValidationIssue::TooLarge { limit_mb } => write!(f, "larger than {limit_mb}MB"),
        }
    }
}

/// Everything that can go wrong between a user action and the backend.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{file} rejected: {issue}")]
    Validation { file: String, issue: ValidationIssue },
    #[error("network error calling '{endpoint}': {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("'{endpoint}' returned HTTP status {status}")]
    Http { endpoint: String, status: StatusCode },
    #[error("'{endpoint}' returned an invalid response: {reason}")]
    Protocol { endpoint: String, reason: String },
}

impl DispatchError {
    pub fn not_pdf(file: impl Into<String>) -> Self {
        Self::Validation {
            file: file.into(),
            issue: ValidationIssue::NotPdf,
        }
    }

    pub fn too_large(file: impl Into<String>, limit_mb: u64) -> Self {
        Self::Validation {
            file: file.into(),
            issue: ValidationIssue::TooLarge { limit_mb },
        }
    }

    pub fn network(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            endpoint: endpoint.into(),
            source,
        }
    }

    pub fn http(endpoint: impl Into<String>, status: StatusCode) -> Self {
        Self::Http {
            endpoint: endpoint.into(),
            status,
        }
    }

    pub fn protocol(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Protocol {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DispatchError::Validation { .. })
    }

    /// Short explanation suitable for the error banner
    pub fn user_message(&self) -> String {
        match self {
            DispatchError::Validation { file, issue } => match issue {
                ValidationIssue::NotPdf => format!("{file} is not a PDF file"),
                ValidationIssue::TooLarge { limit_mb } => {
                    format!("{file} exceeds the maximum file size of {limit_mb}MB")
                }
            },
            DispatchError::Network { source, .. } => {
                if source.is_connect() {
                    "could not connect to the PolicyChat service".to_string()
                } else if source.is_timeout() {
                    "the request timed out".to_string()
                } else if source.is_decode() {
                    "the response could not be read".to_string()
                } else {
                    "a network error occurred".to_string()
                }
            }
            DispatchError::Http { status, .. } => {
                format!("HTTP error! Status: {}", status.as_u16())
            }
            DispatchError::Protocol { reason, .. } => reason.clone(),
        }
    }

    /// Banner text for a failed upload of `file`.
    pub fn upload_message(&self, file: &str) -> String {
        match self {
            DispatchError::Validation { .. } => self.user_message(),
            other => format!("Failed to upload {file} ({})", other.user_message()),
        }
    }
}
