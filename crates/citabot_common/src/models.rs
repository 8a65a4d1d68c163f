// --- File: crates/citabot_common/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::fmt;

/// Start or end of a calendar event, in the Google Calendar wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    /// RFC 3339 timestamp with offset, e.g. `2025-07-21T10:00:00-03:00`.
    pub date_time: String,
    /// IANA time zone name, e.g. `America/Argentina/Buenos_Aires`.
    pub time_zone: String,
}

impl EventTime {
    pub fn new(date_time: impl Into<String>, time_zone: impl Into<String>) -> Self {
        Self {
            date_time: date_time.into(),
            time_zone: time_zone.into(),
        }
    }
}

/// A calendar entry as produced by the appointment planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Present for events that already exist in the calendar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

/// Represents the result of a calendar event operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEventResult {
    /// The ID of the event.
    pub event_id: Option<String>,
    /// The status of the event.
    pub status: String,
}

/// Messaging platform a message arrived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Messenger,
    Whatsapp,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Messenger => write!(f, "messenger"),
            Channel::Whatsapp => write!(f, "whatsapp"),
        }
    }
}

/// A text message extracted from a webhook delivery, independent of the channel envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub channel: Channel,
    /// PSID for Messenger, phone number for WhatsApp.
    pub sender_id: String,
    pub recipient_id: Option<String>,
    pub text: String,
}

impl InboundMessage {
    pub fn new(channel: Channel, sender_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel,
            sender_id: sender_id.into(),
            recipient_id: None,
            text: text.into(),
        }
    }
}

/// Outcome of an outbound reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryResult {
    /// Platform id of the last message sent, when the API returned one.
    pub message_id: Option<String>,
    /// Number of API calls the text was split into.
    pub chunks: usize,
}
