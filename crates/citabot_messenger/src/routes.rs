// --- File: crates/citabot_messenger/src/routes.rs ---
use axum::{routing::get, Router};
use citabot_appointments::AppointmentProcessor;
use citabot_common::DynMessageSender;
use citabot_config::MessengerConfig;
use std::sync::Arc;

use crate::handlers::{verify_webhook_handler, webhook_handler, MessengerState};

/// Creates a router containing all routes for the Messenger feature.
pub fn routes(
    config: MessengerConfig,
    processor: Arc<AppointmentProcessor>,
    sender: Option<DynMessageSender>,
) -> Router {
    let state = Arc::new(MessengerState {
        config,
        processor,
        sender,
    });

    Router::new()
        .route(
            "/messenger/webhook",
            get(verify_webhook_handler).post(webhook_handler),
        )
        .with_state(state)
}
