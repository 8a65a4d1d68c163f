// --- File: crates/citabot_appointments/src/planner.rs ---
//! Fixed calendar events per intent.
//!
//! The planner ignores the message content: every create books the same
//! window, every modify moves the same event, every cancel removes the same
//! event. Values come from the `appointments` config section and are checked
//! once, when the planner is built.

use chrono::{DateTime, Duration, FixedOffset};
use chrono_tz::Tz;
use citabot_common::{CalendarEvent, EventTime, InboundMessage};
use citabot_config::AppointmentsConfig;

use crate::error::AppointmentError;

#[derive(Debug, Clone)]
pub struct AppointmentPlanner {
    create_event: CalendarEvent,
    modify_event: CalendarEvent,
    modify_event_id: String,
    cancel_event_id: String,
}

fn parse_start(value: &str, field: &str) -> Result<DateTime<FixedOffset>, AppointmentError> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|e| AppointmentError::InvalidConfig(format!("{field} '{value}': {e}")))
}

fn window(
    summary: &str,
    start: DateTime<FixedOffset>,
    duration: Duration,
    time_zone: &str,
) -> CalendarEvent {
    let end = start + duration;
    CalendarEvent {
        id: None,
        summary: summary.to_string(),
        description: None,
        start: EventTime::new(start.to_rfc3339(), time_zone),
        end: EventTime::new(end.to_rfc3339(), time_zone),
    }
}

impl AppointmentPlanner {
    pub fn from_config(config: &AppointmentsConfig) -> Result<Self, AppointmentError> {
        config.time_zone.parse::<Tz>().map_err(|_| {
            AppointmentError::InvalidConfig(format!("unknown time_zone '{}'", config.time_zone))
        })?;
        if config.duration_minutes <= 0 {
            return Err(AppointmentError::InvalidConfig(format!(
                "duration_minutes must be positive, got {}",
                config.duration_minutes
            )));
        }
        if config.modify_event_id.is_empty() || config.cancel_event_id.is_empty() {
            return Err(AppointmentError::InvalidConfig(
                "modify_event_id and cancel_event_id must not be empty".to_string(),
            ));
        }

        let duration = Duration::minutes(config.duration_minutes);
        let create_start = parse_start(&config.create_start, "create_start")?;
        let modify_start = parse_start(&config.modify_start, "modify_start")?;

        let mut modify_event = window(&config.modify_summary, modify_start, duration, &config.time_zone);
        modify_event.id = Some(config.modify_event_id.clone());

        Ok(Self {
            create_event: window(&config.create_summary, create_start, duration, &config.time_zone),
            modify_event,
            modify_event_id: config.modify_event_id.clone(),
            cancel_event_id: config.cancel_event_id.clone(),
        })
    }

    /// The event to insert for a booking request.
    pub fn create(&self, _message: &InboundMessage) -> CalendarEvent {
        self.create_event.clone()
    }

    /// The event id to update and its new contents.
    pub fn modify(&self, _message: &InboundMessage) -> (String, CalendarEvent) {
        (self.modify_event_id.clone(), self.modify_event.clone())
    }

    /// The event id to delete.
    pub fn cancel(&self, _message: &InboundMessage) -> String {
        self.cancel_event_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citabot_common::Channel;

    const TZ: &str = "America/Argentina/Buenos_Aires";

    fn message(text: &str) -> InboundMessage {
        InboundMessage::new(Channel::Messenger, "USER_ID", text)
    }

    #[test]
    fn test_default_config_yields_fixed_events() {
        let planner = AppointmentPlanner::from_config(&AppointmentsConfig::default()).unwrap();

        let created = planner.create(&message("Hola, quiero agendar una cita para mañana a las 10am."));
        assert_eq!(created.summary, "Cita agendada");
        assert_eq!(created.start, EventTime::new("2025-07-21T10:00:00-03:00", TZ));
        assert_eq!(created.end, EventTime::new("2025-07-21T11:00:00-03:00", TZ));
        assert_eq!(created.id, None);

        let (event_id, modified) = planner.modify(&message("Hola, quiero cambiar mi cita a las 11am."));
        assert_eq!(event_id, "evento_a_modificar_id");
        assert_eq!(modified.summary, "Cita modificada");
        assert_eq!(modified.start, EventTime::new("2025-07-21T11:00:00-03:00", TZ));
        assert_eq!(modified.end, EventTime::new("2025-07-21T12:00:00-03:00", TZ));

        assert_eq!(planner.cancel(&message("Hola, quiero cancelar mi cita.")), "evento_a_cancelar_id");
    }

    #[test]
    fn test_output_does_not_depend_on_text() {
        let planner = AppointmentPlanner::from_config(&AppointmentsConfig::default()).unwrap();
        assert_eq!(planner.create(&message("a las 8")), planner.create(&message("a las 19")));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let bad_zone = AppointmentsConfig {
            time_zone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            AppointmentPlanner::from_config(&bad_zone),
            Err(AppointmentError::InvalidConfig(_))
        ));

        let bad_start = AppointmentsConfig {
            create_start: "mañana 10am".to_string(),
            ..Default::default()
        };
        assert!(AppointmentPlanner::from_config(&bad_start).is_err());

        let zero_length = AppointmentsConfig {
            duration_minutes: 0,
            ..Default::default()
        };
        assert!(AppointmentPlanner::from_config(&zero_length).is_err());
    }
}
