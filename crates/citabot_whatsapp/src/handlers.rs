// --- File: crates/citabot_whatsapp/src/handlers.rs ---
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use citabot_appointments::AppointmentProcessor;
use citabot_common::{
    webhook::{check_signature, verify_subscription, HubQuery, SubscriptionError, EVENT_RECEIVED},
    CitabotError, DynMessageSender,
};
use citabot_config::WhatsappConfig;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::WhatsappWebhook;

/// Shared state for the WhatsApp routes.
pub struct WhatsappState {
    pub config: WhatsappConfig,
    pub processor: Arc<AppointmentProcessor>,
    /// `None` when the Cloud API token or phone number id is missing.
    pub sender: Option<DynMessageSender>,
}

/// Subscription handshake: 400 without mode/token, 403 on mismatch.
pub async fn verify_webhook_handler(
    State(state): State<Arc<WhatsappState>>,
    Query(query): Query<HubQuery>,
) -> Response {
    match verify_subscription(&query, &state.config.verify_token) {
        Ok(challenge) => {
            info!("WhatsApp webhook verified");
            (StatusCode::OK, challenge).into_response()
        }
        Err(SubscriptionError::MissingParameters) => {
            warn!("WhatsApp webhook verification without mode or token");
            StatusCode::BAD_REQUEST.into_response()
        }
        Err(err) => {
            warn!("WhatsApp webhook verification failed: {}", err);
            StatusCode::FORBIDDEN.into_response()
        }
    }
}

/// Receives Cloud API notifications.
///
/// Anything that is valid JSON is acknowledged with 200, including objects of
/// another kind and envelopes of an unexpected shape.
pub async fn webhook_handler(
    State(state): State<Arc<WhatsappState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, CitabotError> {
    check_signature(state.config.app_secret.as_deref(), &headers, &body)?;

    let raw: Value = serde_json::from_slice(&body)?;
    match serde_json::from_value::<WhatsappWebhook>(raw) {
        Ok(payload) if payload.is_business_account() => {
            let messages = payload.text_messages();
            info!("WhatsApp delivery with {} text message(s)", messages.len());
            for message in &messages {
                state.processor.handle(message, state.sender.as_ref()).await;
            }
        }
        Ok(payload) => info!("Ignoring WhatsApp webhook for object '{}'", payload.object),
        Err(err) => warn!("WhatsApp webhook with unexpected structure, ignoring: {}", err),
    }

    Ok((StatusCode::OK, EVENT_RECEIVED).into_response())
}
