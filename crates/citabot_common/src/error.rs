// --- File: crates/citabot_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all citabot errors.
///
/// Each crate keeps its own error enum and implements `From<CrateError> for CitabotError`
/// so handlers can answer with a single response shape.
#[derive(Error, Debug)]
pub enum CitabotError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// The caller is known but not allowed, e.g. a bad webhook signature or verify token
    #[error("Forbidden: {0}")]
    ForbiddenError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for CitabotError {
    fn status_code(&self) -> u16 {
        match self {
            CitabotError::HttpError(_) => 500,
            CitabotError::ParseError(_) => 400,
            CitabotError::ConfigError(_) => 500,
            CitabotError::AuthError(_) => 401,
            CitabotError::ForbiddenError(_) => 403,
            CitabotError::ValidationError(_) => 400,
            CitabotError::ExternalServiceError { .. } => 502,
            CitabotError::NotFoundError(_) => 404,
            CitabotError::InternalError(_) => 500,
        }
    }
}

impl From<reqwest::Error> for CitabotError {
    fn from(err: reqwest::Error) -> Self {
        CitabotError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for CitabotError {
    fn from(err: serde_json::Error) -> Self {
        CitabotError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for CitabotError {
    fn from(err: std::io::Error) -> Self {
        CitabotError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> CitabotError {
    CitabotError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> CitabotError {
    CitabotError::ValidationError(message.to_string())
}

pub fn forbidden<T: fmt::Display>(message: T) -> CitabotError {
    CitabotError::ForbiddenError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> CitabotError {
    CitabotError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> CitabotError {
    CitabotError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
