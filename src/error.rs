//! Request-level error kinds and their single status-code mapping.

use std::error::Error;
use std::fmt;

use crate::store::StoreError;

/// Error type for gateway operations.
///
/// Every component operation fails with one of these kinds; the HTTP layer
/// maps kind to status exactly once instead of each route re-implementing
/// the translation.
#[derive(Debug)]
pub enum GatewayError {
    /// Missing or malformed request parameters.
    Validation(String),
    /// No matching entity in the targeted store.
    NotFound(String),
    /// Transport or query failure against either backend. The message is the
    /// underlying client's, passed through verbatim.
    Backend(StoreError),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Validation(message) => write!(f, "{}", message),
            GatewayError::NotFound(message) => write!(f, "{}", message),
            GatewayError::Backend(err) => write!(f, "{}", err),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GatewayError::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        GatewayError::Backend(err)
    }
}

impl GatewayError {
    /// Map this error to the HTTP status carrying its kind.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Validation(_) => 400,
            GatewayError::NotFound(_) => 404,
            GatewayError::Backend(_) => 500,
        }
    }
}
