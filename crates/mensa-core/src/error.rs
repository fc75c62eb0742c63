//! Centralized error types for the Mensa host.
//!
//! This module provides a typed error hierarchy that:
//! - Separates transport failures from configuration and lifecycle problems
//! - Provides short messages suitable for logs and CLI output
//! - Preserves full error context for debugging

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a message suitable for the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Integration error: {0}")]
    Integration(#[from] IntegrationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Recover the typed error behind an `anyhow::Error`, falling back to `Other`.
    pub fn classify(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ConfigError>() {
            Ok(e) => return e.into(),
            Err(err) => err,
        };
        let err = match err.downcast::<IntegrationError>() {
            Ok(e) => return e.into(),
            Err(err) => err,
        };
        let err = match err.downcast::<NetworkError>() {
            Ok(e) => return e.into(),
            Err(err) => err,
        };
        match err.downcast::<std::io::Error>() {
            Ok(e) => e.into(),
            Err(err) => AppError::Other(err),
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Integration(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Check permissions and try again.",
            AppError::Other(_) => "An unexpected error occurred.",
        }
    }
}

/// Transport-level failures talking to a remote API.
#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("TLS/SSL error: {0}")]
    TlsError(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to reach the menu service. Check your internet connection."
            }
            NetworkError::Timeout => "The menu service did not answer in time.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The menu service is having trouble. Try again later."
            }
            NetworkError::ServerError { .. } => "The menu service rejected the request.",
            NetworkError::InvalidResponse(_) => "The menu service sent data we could not read.",
            NetworkError::TlsError(_) => "Secure connection failed. Check your network settings.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Integration lifecycle errors.
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// Setup failed; the integration stays offline and publishes nothing.
    #[error("Integration {id} not ready: {reason}")]
    NotReady { id: String, reason: String },

    #[error("Integration already registered: {0}")]
    AlreadyRegistered(String),
}

impl IntegrationError {
    pub fn not_ready(id: impl Into<String>, reason: impl ToString) -> Self {
        IntegrationError::NotReady {
            id: id.into(),
            reason: reason.to_string(),
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            IntegrationError::NotReady { .. } => {
                "The canteen could not be loaded. It will not be shown until the next start."
            }
            IntegrationError::AlreadyRegistered(_) => "This canteen is configured twice.",
        }
    }
}

/// Extension trait for classifying reqwest errors.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
