// --- File: crates/citabot_messenger/src/handlers.rs ---
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use citabot_appointments::AppointmentProcessor;
use citabot_common::{
    not_found,
    webhook::{check_signature, verify_subscription, HubQuery, EVENT_RECEIVED},
    CitabotError, DynMessageSender,
};
use citabot_config::MessengerConfig;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::MessengerWebhook;

/// Shared state for the Messenger routes.
pub struct MessengerState {
    pub config: MessengerConfig,
    pub processor: Arc<AppointmentProcessor>,
    /// `None` when no page access token is configured.
    pub sender: Option<DynMessageSender>,
}

/// Subscription handshake. Any failure answers 403.
pub async fn verify_webhook_handler(
    State(state): State<Arc<MessengerState>>,
    Query(query): Query<HubQuery>,
) -> Response {
    match verify_subscription(&query, &state.config.verify_token) {
        Ok(challenge) => {
            info!("Messenger webhook verified");
            (StatusCode::OK, challenge).into_response()
        }
        Err(err) => {
            warn!("Messenger webhook verification failed: {}", err);
            StatusCode::FORBIDDEN.into_response()
        }
    }
}

/// Receives page deliveries and processes each text message before acknowledging.
pub async fn webhook_handler(
    State(state): State<Arc<MessengerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, CitabotError> {
    check_signature(state.config.app_secret.as_deref(), &headers, &body)?;

    let payload: MessengerWebhook = serde_json::from_slice(&body)?;
    if !payload.is_page() {
        warn!("Messenger webhook for unsupported object '{}'", payload.object);
        return Err(not_found(format!("unsupported object '{}'", payload.object)));
    }

    let messages = payload.text_messages();
    info!("Messenger delivery with {} text message(s)", messages.len());
    for message in &messages {
        state.processor.handle(message, state.sender.as_ref()).await;
    }

    Ok((StatusCode::OK, EVENT_RECEIVED).into_response())
}
