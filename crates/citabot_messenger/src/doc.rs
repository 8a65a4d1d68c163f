// --- File: crates/citabot_messenger/src/doc.rs ---
#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::models::{MessagingEvent, MessengerEntry, MessengerMessage, MessengerWebhook, Participant};

#[utoipa::path(
    get,
    path = "/messenger/webhook", // Path relative to /api
    params(
        ("hub.mode" = String, Query, description = "Always `subscribe`"),
        ("hub.verify_token" = String, Query, description = "Token configured in the Meta app"),
        ("hub.challenge" = String, Query, description = "Value to echo back"),
    ),
    responses(
        (status = 200, description = "Challenge echoed back", body = String, content_type = "text/plain"),
        (status = 403, description = "Verify token mismatch")
    ),
    tag = "Messenger"
)]
fn doc_verify_webhook_handler() {}

#[utoipa::path(
    post,
    path = "/messenger/webhook", // Path relative to /api
    request_body(content = MessengerWebhook, example = json!({
        "object": "page",
        "entry": [{
            "id": "PAGE_ID",
            "time": 1458692752478i64,
            "messaging": [{
                "sender": {"id": "USER_ID"},
                "recipient": {"id": "PAGE_ID"},
                "timestamp": 1458692752478i64,
                "message": {"mid": "mid.1457764197618:41d102a3e1ae206a38", "text": "Hola, quiero agendar una cita para mañana a las 10am."}
            }]
        }]
    })),
    responses(
        (status = 200, description = "Delivery processed", body = String, example = json!("EVENT_RECEIVED")),
        (status = 400, description = "Malformed JSON body"),
        (status = 403, description = "X-Hub-Signature-256 mismatch"),
        (status = 404, description = "Object is not `page`")
    ),
    tag = "Messenger"
)]
fn doc_webhook_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_verify_webhook_handler, doc_webhook_handler),
    components(schemas(MessengerWebhook, MessengerEntry, MessagingEvent, MessengerMessage, Participant)),
    tags((name = "Messenger", description = "Facebook Messenger webhook"))
)]
pub struct MessengerApiDoc;
