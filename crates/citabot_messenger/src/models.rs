// --- File: crates/citabot_messenger/src/models.rs ---
//! Messenger Platform webhook envelope and Send API payloads.
//!
//! Only the fields the bot reads are modelled; unknown fields are ignored.

use citabot_common::{Channel, InboundMessage};
use serde::{Deserialize, Serialize};

/// `object` value of page subscriptions.
pub const PAGE_OBJECT: &str = "page";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessengerWebhook {
    pub object: String,
    #[serde(default)]
    pub entry: Vec<MessengerEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessengerEntry {
    /// Page id.
    pub id: Option<String>,
    pub time: Option<i64>,
    #[serde(default)]
    pub messaging: Vec<MessagingEvent>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessagingEvent {
    pub sender: Participant,
    pub recipient: Option<Participant>,
    pub timestamp: Option<i64>,
    pub message: Option<MessengerMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Participant {
    /// PSID for users, page id for the page.
    pub id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessengerMessage {
    pub mid: Option<String>,
    pub text: Option<String>,
    /// Set on copies of the page's own outgoing messages.
    #[serde(default)]
    pub is_echo: bool,
}

impl MessengerWebhook {
    pub fn is_page(&self) -> bool {
        self.object == PAGE_OBJECT
    }

    /// User text messages in delivery order. Echoes, attachments and
    /// postbacks are skipped.
    pub fn text_messages(&self) -> Vec<InboundMessage> {
        self.entry
            .iter()
            .flat_map(|entry| entry.messaging.iter())
            .filter_map(|event| {
                let message = event.message.as_ref().filter(|m| !m.is_echo)?;
                let text = message.text.as_deref()?;
                Some(InboundMessage {
                    channel: Channel::Messenger,
                    sender_id: event.sender.id.clone(),
                    recipient_id: event.recipient.as_ref().map(|r| r.id.clone()),
                    text: text.to_string(),
                })
            })
            .collect()
    }
}

/// Send API request body.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest<'a> {
    pub recipient: SendRecipient<'a>,
    pub message: SendText<'a>,
    pub messaging_type: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendRecipient<'a> {
    pub id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendText<'a> {
    pub text: &'a str,
}

impl<'a> SendMessageRequest<'a> {
    /// A reply inside the 24h standard messaging window.
    pub fn response(recipient: &'a str, text: &'a str) -> Self {
        Self {
            recipient: SendRecipient { id: recipient },
            message: SendText { text },
            messaging_type: "RESPONSE",
        }
    }
}

/// Send API success body.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageResponse {
    pub recipient_id: Option<String>,
    pub message_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_messages_skips_echo_and_attachments() {
        let webhook: MessengerWebhook = serde_json::from_value(json!({
            "object": "page",
            "entry": [{
                "id": "PAGE_ID",
                "time": 1458692752478i64,
                "messaging": [
                    {
                        "sender": {"id": "USER_ID"},
                        "recipient": {"id": "PAGE_ID"},
                        "timestamp": 1458692752478i64,
                        "message": {"mid": "mid.1", "text": "Hola, quiero cancelar mi cita."}
                    },
                    {
                        "sender": {"id": "PAGE_ID"},
                        "recipient": {"id": "USER_ID"},
                        "message": {"mid": "mid.2", "text": "Tu cita fue cancelada.", "is_echo": true}
                    },
                    {
                        "sender": {"id": "USER_ID"},
                        "recipient": {"id": "PAGE_ID"},
                        "message": {"mid": "mid.3", "attachments": [{"type": "image"}]}
                    },
                    {
                        "sender": {"id": "USER_ID"},
                        "recipient": {"id": "PAGE_ID"},
                        "postback": {"payload": "GET_STARTED"}
                    }
                ]
            }]
        }))
        .unwrap();

        assert!(webhook.is_page());
        let messages = webhook.text_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender_id, "USER_ID");
        assert_eq!(messages[0].recipient_id.as_deref(), Some("PAGE_ID"));
        assert_eq!(messages[0].text, "Hola, quiero cancelar mi cita.");
    }

    #[test]
    fn test_send_request_shape() {
        let body = serde_json::to_value(SendMessageRequest::response("USER_ID", "Hola")).unwrap();
        assert_eq!(
            body,
            json!({
                "recipient": {"id": "USER_ID"},
                "message": {"text": "Hola"},
                "messaging_type": "RESPONSE"
            })
        );
    }
}
