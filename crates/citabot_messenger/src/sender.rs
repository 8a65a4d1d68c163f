// --- File: crates/citabot_messenger/src/sender.rs ---
//! Replies through the Messenger Send API.

use citabot_common::{
    services::BoxFuture, Channel, DeliveryResult, MessageSender, HTTP_CLIENT,
};
use citabot_config::{env_vars::SECRET_MARKER, MessengerConfig};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::error::MessengerError;
use crate::models::{SendMessageRequest, SendMessageResponse};
use crate::split::{split_message, MAX_MESSAGE_CHARS};

pub struct MessengerSender {
    client: Client,
    endpoint: String,
    access_token: String,
    chunk_delay: Duration,
}

impl MessengerSender {
    /// Builds a sender from config; fails when no page access token is set.
    pub fn from_config(config: &MessengerConfig) -> Result<Self, MessengerError> {
        let access_token = config
            .access_token
            .clone()
            .filter(|token| !token.is_empty() && token != SECRET_MARKER)
            .ok_or_else(|| MessengerError::ConfigError("access_token not set".to_string()))?;

        Ok(Self {
            client: HTTP_CLIENT.clone(),
            endpoint: format!(
                "{}/{}/me/messages",
                config.graph_api_base.trim_end_matches('/'),
                config.graph_api_version
            ),
            access_token,
            chunk_delay: Duration::from_millis(config.chunk_delay_ms),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_chunk(
        &self,
        recipient: &str,
        text: &str,
    ) -> Result<SendMessageResponse, MessengerError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("access_token", self.access_token.as_str())])
            .json(&SendMessageRequest::response(recipient, text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Messenger Send API returned {}: {}", status, body);
            return Err(MessengerError::ApiError {
                status_code: status.as_u16(),
                message: body,
            });
        }

        Ok(response.json::<SendMessageResponse>().await?)
    }
}

impl MessageSender for MessengerSender {
    type Error = MessengerError;

    fn channel(&self) -> Channel {
        Channel::Messenger
    }

    fn send_text(&self, recipient: &str, text: &str) -> BoxFuture<'_, DeliveryResult, Self::Error> {
        let recipient = recipient.to_string();
        let text = text.to_string();

        Box::pin(async move {
            let chunks = split_message(&text, MAX_MESSAGE_CHARS);
            let mut message_id = None;

            for (index, chunk) in chunks.iter().enumerate() {
                if index > 0 && !self.chunk_delay.is_zero() {
                    tokio::time::sleep(self.chunk_delay).await;
                }
                let sent = self.send_chunk(&recipient, chunk).await?;
                debug!("Sent chunk {}/{} as {:?}", index + 1, chunks.len(), sent.message_id);
                message_id = sent.message_id;
            }

            info!("Messenger reply sent to {} in {} chunk(s)", recipient, chunks.len());
            Ok(DeliveryResult {
                message_id,
                chunks: chunks.len(),
            })
        })
    }
}
