// --- File: crates/citabot_whatsapp/src/routes.rs ---
use axum::{routing::get, Router};
use citabot_appointments::AppointmentProcessor;
use citabot_common::DynMessageSender;
use citabot_config::WhatsappConfig;
use std::sync::Arc;

use crate::handlers::{verify_webhook_handler, webhook_handler, WhatsappState};

/// WhatsApp webhook routes, relative to the `/api` nest.
pub fn routes(
    config: WhatsappConfig,
    processor: Arc<AppointmentProcessor>,
    sender: Option<DynMessageSender>,
) -> Router {
    let state = Arc::new(WhatsappState {
        config,
        processor,
        sender,
    });

    Router::new()
        .route(
            "/whatsapp/webhook",
            get(verify_webhook_handler).post(webhook_handler),
        )
        .with_state(state)
}
