// --- File: crates/citabot_whatsapp/src/models.rs ---
//! WhatsApp Cloud API webhook envelope and message payloads.

use citabot_common::{Channel, InboundMessage};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// `object` value of WhatsApp Business Account subscriptions.
pub const WHATSAPP_OBJECT: &str = "whatsapp_business_account";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WhatsappWebhook {
    pub object: String,
    #[serde(default)]
    pub entry: Vec<WhatsappEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WhatsappEntry {
    /// WhatsApp Business Account id.
    pub id: Option<String>,
    #[serde(default)]
    pub changes: Vec<WhatsappChange>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WhatsappChange {
    pub field: Option<String>,
    pub value: Option<ChangeValue>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChangeValue {
    pub messaging_product: Option<String>,
    pub metadata: Option<Metadata>,
    /// Absent on status-only notifications.
    #[serde(default)]
    pub messages: Vec<WhatsappMessage>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Metadata {
    pub display_phone_number: Option<String>,
    pub phone_number_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WhatsappMessage {
    /// Sender's WhatsApp id (phone number without `+`).
    pub from: String,
    pub id: Option<String>,
    pub timestamp: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<TextBody>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TextBody {
    pub body: String,
}

impl WhatsappWebhook {
    pub fn is_business_account(&self) -> bool {
        self.object == WHATSAPP_OBJECT
    }

    /// Text messages across all entries and changes. Other message types
    /// (image, audio, interactive...) are skipped.
    pub fn text_messages(&self) -> Vec<InboundMessage> {
        self.entry
            .iter()
            .flat_map(|entry| entry.changes.iter())
            .filter_map(|change| change.value.as_ref())
            .flat_map(|value| {
                let phone_number_id = value
                    .metadata
                    .as_ref()
                    .and_then(|m| m.phone_number_id.clone());
                value.messages.iter().filter_map(move |message| {
                    let Some(text) = message.text.as_ref().filter(|_| message.kind == "text") else {
                        debug!("Ignoring WhatsApp '{}' message from {}", message.kind, message.from);
                        return None;
                    };
                    Some(InboundMessage {
                        channel: Channel::Whatsapp,
                        sender_id: message.from.clone(),
                        recipient_id: phone_number_id.clone(),
                        text: text.body.clone(),
                    })
                })
            })
            .collect()
    }
}

/// Cloud API text message request body.
#[derive(Debug, Clone, Serialize)]
pub struct SendTextRequest<'a> {
    pub messaging_product: &'static str,
    pub to: &'a str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: SendTextBody<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendTextBody<'a> {
    pub body: &'a str,
}

impl<'a> SendTextRequest<'a> {
    pub fn new(to: &'a str, body: &'a str) -> Self {
        Self {
            messaging_product: "whatsapp",
            to,
            kind: "text",
            text: SendTextBody { body },
        }
    }
}

/// Cloud API success body.
#[derive(Debug, Clone, Deserialize)]
pub struct SendTextResponse {
    #[serde(default)]
    pub messages: Vec<SentMessageId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentMessageId {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_messages_from_envelope() {
        let webhook: WhatsappWebhook = serde_json::from_value(json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "WABA_ID",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "metadata": {"display_phone_number": "15550000000", "phone_number_id": "PHONE_ID"},
                        "contacts": [{"profile": {"name": "Ana"}, "wa_id": "5215512345678"}],
                        "messages": [
                            {
                                "from": "5215512345678",
                                "id": "wamid.1",
                                "timestamp": "1720000000",
                                "type": "text",
                                "text": {"body": "Hola, quiero cancelar mi cita."}
                            },
                            {
                                "from": "5215512345678",
                                "id": "wamid.2",
                                "timestamp": "1720000001",
                                "type": "image",
                                "image": {"id": "MEDIA_ID"}
                            }
                        ]
                    }
                }]
            }]
        }))
        .unwrap();

        assert!(webhook.is_business_account());
        let messages = webhook.text_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].channel, Channel::Whatsapp);
        assert_eq!(messages[0].sender_id, "5215512345678");
        assert_eq!(messages[0].recipient_id.as_deref(), Some("PHONE_ID"));
        assert_eq!(messages[0].text, "Hola, quiero cancelar mi cita.");
    }

    #[test]
    fn test_status_notification_has_no_messages() {
        let webhook: WhatsappWebhook = serde_json::from_value(json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "WABA_ID",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "statuses": [{"id": "wamid.1", "status": "delivered"}]
                    }
                }]
            }]
        }))
        .unwrap();

        assert!(webhook.text_messages().is_empty());
    }

    #[test]
    fn test_send_request_shape() {
        let body = serde_json::to_value(SendTextRequest::new("525512345678", "Hola")).unwrap();
        assert_eq!(
            body,
            json!({
                "messaging_product": "whatsapp",
                "to": "525512345678",
                "type": "text",
                "text": {"body": "Hola"}
            })
        );
    }
}
