// --- File: crates/citabot_gcal/src/lib.rs ---
pub mod auth;
pub mod service;

pub use auth::{create_calendar_hub, HubType};
pub use service::{to_google_event, GcalServiceError, GoogleCalendarService};
