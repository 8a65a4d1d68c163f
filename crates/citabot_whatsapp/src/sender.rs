// --- File: crates/citabot_whatsapp/src/sender.rs ---
//! Replies through the WhatsApp Cloud API.

use citabot_common::{
    services::BoxFuture, Channel, DeliveryResult, MessageSender, HTTP_CLIENT,
};
use citabot_config::{env_vars::SECRET_MARKER, WhatsappConfig};
use reqwest::Client;
use tracing::{error, info};

use crate::error::WhatsappError;
use crate::models::{SendTextRequest, SendTextResponse};
use crate::phone::normalize_recipient;

fn configured(value: &Option<String>) -> Option<String> {
    value
        .clone()
        .filter(|v| !v.is_empty() && v != SECRET_MARKER)
}

pub struct WhatsappSender {
    client: Client,
    endpoint: String,
    api_token: String,
}

impl WhatsappSender {
    /// Builds a sender from config; needs both the API token and the phone number id.
    pub fn from_config(config: &WhatsappConfig) -> Result<Self, WhatsappError> {
        let api_token = configured(&config.api_token)
            .ok_or_else(|| WhatsappError::ConfigError("api_token not set".to_string()))?;
        let phone_number_id = configured(&config.phone_number_id)
            .ok_or_else(|| WhatsappError::ConfigError("phone_number_id not set".to_string()))?;

        Ok(Self {
            client: HTTP_CLIENT.clone(),
            endpoint: format!(
                "{}/{}/{}/messages",
                config.graph_api_base.trim_end_matches('/'),
                config.graph_api_version,
                phone_number_id
            ),
            api_token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl MessageSender for WhatsappSender {
    type Error = WhatsappError;

    fn channel(&self) -> Channel {
        Channel::Whatsapp
    }

    fn send_text(&self, recipient: &str, text: &str) -> BoxFuture<'_, DeliveryResult, Self::Error> {
        let to = normalize_recipient(recipient);
        if to != recipient {
            info!("Normalized WhatsApp recipient {} to {}", recipient, to);
        }
        let text = text.to_string();

        Box::pin(async move {
            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_token)
                .json(&SendTextRequest::new(&to, &text))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                error!("WhatsApp Cloud API returned {}: {}", status, body);
                return Err(WhatsappError::ApiError {
                    status_code: status.as_u16(),
                    message: body,
                });
            }

            let sent = response.json::<SendTextResponse>().await?;
            info!("WhatsApp reply sent to {}", to);
            Ok(DeliveryResult {
                message_id: sent.messages.into_iter().next().map(|m| m.id),
                chunks: 1,
            })
        })
    }
}
