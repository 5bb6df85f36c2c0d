use thiserror::Error;

use crate::backend::BackendError;
use crate::config::ConfigError;
use crate::filter::FilterError;

/// Lookup failure, classified by who has to fix it
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Bad collection name or malformed parameter; never reaches the backend
    #[error("{0}")]
    Validation(String),

    /// Backend URL or credential missing. The message never carries the credential.
    #[error("{0}")]
    Configuration(String),

    /// Upstream status >= 400, transport failure or unusable payload
    #[error("{message}")]
    Backend { status: Option<u16>, message: String },

    #[error("{0}")]
    Unexpected(String),
}

impl PortfolioError {
    pub fn unknown_collection(name: &str, valid: &[&str]) -> Self {
        PortfolioError::Validation(format!("Unknown collection '{}'. Valid: {}", name, valid.join(", ")))
    }

    pub fn upstream_status(status: u16, excerpt: &str) -> Self {
        PortfolioError::Backend {
            status: Some(status),
            message: format!("Supabase error {}: {}", status, excerpt),
        }
    }
}

impl From<FilterError> for PortfolioError {
    fn from(err: FilterError) -> Self {
        PortfolioError::Validation(err.to_string())
    }
}

impl From<ConfigError> for PortfolioError {
    fn from(err: ConfigError) -> Self {
        PortfolioError::Configuration(err.to_string())
    }
}

impl From<BackendError> for PortfolioError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Config(e) => e.into(),
            BackendError::InvalidUrl(_) | BackendError::InvalidHeader(_) => {
                PortfolioError::Configuration(err.to_string())
            }
            BackendError::Timeout(_) | BackendError::Transport(_) => PortfolioError::Backend {
                status: None,
                message: err.to_string(),
            },
        }
    }
}
