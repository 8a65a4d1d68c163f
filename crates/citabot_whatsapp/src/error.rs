use citabot_common::{external_service_error, CitabotError, HttpStatusCode};
use thiserror::Error;

/// WhatsApp-specific error types.
#[derive(Error, Debug)]
pub enum WhatsappError {
    /// Error occurred during a Cloud API request
    #[error("WhatsApp API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Cloud API
    #[error("WhatsApp API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Missing or incomplete WhatsApp configuration
    #[error("WhatsApp configuration missing or incomplete: {0}")]
    ConfigError(String),
}

impl From<WhatsappError> for CitabotError {
    fn from(err: WhatsappError) -> Self {
        match err {
            WhatsappError::RequestError(e) => {
                CitabotError::HttpError(format!("WhatsApp request error: {}", e))
            }
            WhatsappError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "WhatsApp Cloud API",
                format!("Status: {}, Message: {}", status_code, message),
            ),
            WhatsappError::ConfigError(msg) => CitabotError::ConfigError(msg),
        }
    }
}

impl HttpStatusCode for WhatsappError {
    fn status_code(&self) -> u16 {
        match self {
            WhatsappError::RequestError(_) => 500,
            WhatsappError::ApiError { .. } => 502,
            WhatsappError::ConfigError(_) => 500,
        }
    }
}
