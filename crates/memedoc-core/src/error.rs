//! Error Types for MemeDoc

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MemeDocError>;

#[derive(Error, Debug)]
pub enum MemeDocError {
    #[error("Invalid token address: {0:?}")]
    InvalidAddress(String),

    #[error("Input out of range: {field} = {value} (expected 0-100)")]
    InputOutOfRange {
        field: &'static str,
        value: i64,
    },

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MemeDocError {
    /// Stable machine-readable code for API responses
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidAddress(_) => "INVALID_ADDRESS",
            Self::InputOutOfRange { .. } => "INPUT_OUT_OF_RANGE",
            Self::Upstream(_) | Self::Network(_) | Self::Serialization(_) => "UPSTREAM_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Whether the caller supplied bad input (as opposed to an upstream failure)
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidAddress(_) | Self::InputOutOfRange { .. })
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidAddress(_) => "Please enter a token contract address.".into(),
            Self::InputOutOfRange { field, .. } => format!("{field} must be between 0 and 100."),
            Self::Upstream(_) | Self::Network(_) | Self::Serialization(_) => {
                "Failed to fetch token information. Please try again.".into()
            }
            Self::Config(msg) => format!("Server misconfigured: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(MemeDocError::InvalidAddress(String::new()).code(), "INVALID_ADDRESS");
        assert_eq!(MemeDocError::Upstream("502".into()).code(), "UPSTREAM_ERROR");

        let err = MemeDocError::InputOutOfRange { field: "price_position", value: 140 };
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Input out of range: price_position = 140 (expected 0-100)");
    }
}
