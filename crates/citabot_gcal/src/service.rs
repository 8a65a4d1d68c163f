// --- File: crates/citabot_gcal/src/service.rs ---
//! Google Calendar implementation of [`CalendarService`].
//!
//! Each operation is one call-through to the Calendar v3 `events` resource on
//! the configured calendar. No retries; errors go back to the caller.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use citabot_common::{
    error::{external_service_error, validation_error, CitabotError, HttpStatusCode},
    services::BoxFuture,
    CalendarEvent, CalendarEventResult, CalendarService,
};
use google_calendar3::api::{Event, EventDateTime};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::auth::HubType;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Failed to parse time: {0}")]
    TimeParseError(String),
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

impl HttpStatusCode for GcalServiceError {
    fn status_code(&self) -> u16 {
        match self {
            GcalServiceError::ApiError(_) => 502,
            GcalServiceError::TimeParseError(_)
            | GcalServiceError::UnknownTimeZone(_)
            | GcalServiceError::InvalidEvent(_) => 400,
        }
    }
}

impl From<GcalServiceError> for CitabotError {
    fn from(err: GcalServiceError) -> Self {
        match err {
            GcalServiceError::ApiError(e) => external_service_error("Google Calendar", e),
            other => validation_error(other),
        }
    }
}

/// Google Calendar service bound to one calendar id.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
    calendar_id: String,
}

impl GoogleCalendarService {
    pub fn new(calendar_hub: Arc<HubType>, calendar_id: impl Into<String>) -> Self {
        Self {
            calendar_hub,
            calendar_id: calendar_id.into(),
        }
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }
}

fn parse_instant(value: &str, field: &str) -> Result<DateTime<Utc>, GcalServiceError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| GcalServiceError::TimeParseError(format!("Invalid {}: {}", field, e)))
}

fn parse_zone(value: &str) -> Result<Tz, GcalServiceError> {
    value
        .parse::<Tz>()
        .map_err(|_| GcalServiceError::UnknownTimeZone(value.to_string()))
}

/// Converts a planner event into the API representation.
///
/// Rejects unparseable timestamps, unknown IANA zones and windows whose end
/// is not after the start.
pub fn to_google_event(event: &CalendarEvent) -> Result<Event, GcalServiceError> {
    let start = parse_instant(&event.start.date_time, "start.dateTime")?;
    let end = parse_instant(&event.end.date_time, "end.dateTime")?;
    parse_zone(&event.start.time_zone)?;
    parse_zone(&event.end.time_zone)?;

    if end <= start {
        return Err(GcalServiceError::InvalidEvent(
            "End time must be after start time".to_string(),
        ));
    }

    Ok(Event {
        summary: Some(event.summary.clone()),
        description: event.description.clone(),
        start: Some(EventDateTime {
            date_time: Some(start),
            time_zone: Some(event.start.time_zone.clone()),
            ..Default::default()
        }),
        end: Some(EventDateTime {
            date_time: Some(end),
            time_zone: Some(event.end.time_zone.clone()),
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn to_result(event: Event) -> CalendarEventResult {
    CalendarEventResult {
        event_id: event.id,
        status: event.status.unwrap_or_else(|| "confirmed".to_string()),
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    fn insert_event(&self, event: CalendarEvent) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_hub = self.calendar_hub.clone();
        let calendar_id = self.calendar_id.clone();

        Box::pin(async move {
            let new_event = to_google_event(&event)?;
            let (_response, created_event) = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .doit()
                .await?;

            info!("Inserted event {:?} into {}", created_event.id, calendar_id);
            Ok(to_result(created_event))
        })
    }

    fn update_event(
        &self,
        event_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_hub = self.calendar_hub.clone();
        let calendar_id = self.calendar_id.clone();
        let event_id = event_id.to_string();

        Box::pin(async move {
            let updated = to_google_event(&event)?;
            let (_response, updated_event) = calendar_hub
                .events()
                .update(updated, &calendar_id, &event_id)
                .doit()
                .await?;

            info!("Updated event {} in {}", event_id, calendar_id);
            Ok(to_result(updated_event))
        })
    }

    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), Self::Error> {
        let calendar_hub = self.calendar_hub.clone();
        let calendar_id = self.calendar_id.clone();
        let event_id = event_id.to_string();

        Box::pin(async move {
            calendar_hub
                .events()
                .delete(&calendar_id, &event_id)
                .doit()
                .await?;

            info!("Deleted event {} from {}", event_id, calendar_id);
            Ok(())
        })
    }
}
