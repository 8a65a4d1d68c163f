// --- File: crates/citabot_messenger/src/error.rs ---
use citabot_common::{external_service_error, CitabotError, HttpStatusCode};
use thiserror::Error;

/// Messenger-specific error types.
#[derive(Error, Debug)]
pub enum MessengerError {
    /// Error occurred during a Send API request
    #[error("Messenger API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Send API
    #[error("Messenger API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Missing or incomplete Messenger configuration
    #[error("Messenger configuration missing or incomplete: {0}")]
    ConfigError(String),
}

impl From<MessengerError> for CitabotError {
    fn from(err: MessengerError) -> Self {
        match err {
            MessengerError::RequestError(e) => {
                CitabotError::HttpError(format!("Messenger request error: {}", e))
            }
            MessengerError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "Messenger Send API",
                format!("Status: {}, Message: {}", status_code, message),
            ),
            MessengerError::ConfigError(msg) => CitabotError::ConfigError(msg),
        }
    }
}

impl HttpStatusCode for MessengerError {
    fn status_code(&self) -> u16 {
        match self {
            MessengerError::RequestError(_) => 500,
            MessengerError::ApiError { .. } => 502,
            MessengerError::ConfigError(_) => 500,
        }
    }
}
