//! Menu fetch and refresh errors.

use mensa_core::{NetworkError, ReqwestErrorExt};
use thiserror::Error;

/// Failure of a single request against the menu API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Transport unavailable: {0}")]
    TransportUnavailable(String),

    #[error("Unexpected HTTP status {status}")]
    Http { status: u16 },

    #[error("Request timed out")]
    Timeout,

    #[error("Malformed response body: {0}")]
    Decode(String),

    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Whether the request never reached a server
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportUnavailable(_))
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::TransportUnavailable(_) => "Menu service unreachable".to_string(),
            Self::Http { status } => format!("Menu service answered with status {}", status),
            Self::Timeout => "Menu service did not answer in time".to_string(),
            Self::Decode(_) => "Menu data could not be read".to_string(),
            Self::InvalidUrl(_) => "The menu service address is not a valid URL".to_string(),
        }
    }
}

impl From<NetworkError> for FetchError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::Timeout => Self::Timeout,
            NetworkError::ServerError { status, .. } => Self::Http { status },
            NetworkError::InvalidResponse(msg) => Self::Decode(msg),
            NetworkError::ConnectionFailed(msg) | NetworkError::TlsError(msg) => {
                Self::TransportUnavailable(msg)
            }
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        err.into_network_error().into()
    }
}

/// Failure of a whole refresh cycle. Only the mandatory first refresh
/// surfaces these to its caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshError {
    /// None of the requests reached the server
    #[error("Menu service unreachable")]
    TransportUnavailable,

    /// Every day of the window failed
    #[error("All day fetches failed")]
    AllDaysFailed,
}

impl RefreshError {
    /// Classify a cycle in which every day failed.
    pub fn from_failures<'a>(failures: impl IntoIterator<Item = &'a FetchError>) -> Self {
        let mut any = false;
        for failure in failures {
            any = true;
            if !failure.is_transport() {
                return Self::AllDaysFailed;
            }
        }
        if any {
            Self::TransportUnavailable
        } else {
            Self::AllDaysFailed
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::TransportUnavailable => "Menu service unreachable. Check your connection.",
            Self::AllDaysFailed => "No menu data could be loaded for this canteen.",
        }
    }
}
