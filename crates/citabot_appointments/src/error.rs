// --- File: crates/citabot_appointments/src/error.rs ---
use citabot_common::{
    error::{config_error, external_service_error, CitabotError, HttpStatusCode},
    BoxedError,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppointmentError {
    /// The `appointments` config section cannot produce a valid event.
    #[error("Invalid appointments config: {0}")]
    InvalidConfig(String),
    #[error("Calendar operation failed: {0}")]
    Calendar(#[source] BoxedError),
}

impl HttpStatusCode for AppointmentError {
    fn status_code(&self) -> u16 {
        match self {
            AppointmentError::InvalidConfig(_) => 500,
            AppointmentError::Calendar(_) => 502,
        }
    }
}

impl From<AppointmentError> for CitabotError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::InvalidConfig(msg) => config_error(msg),
            AppointmentError::Calendar(e) => external_service_error("Google Calendar", e),
        }
    }
}
