#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::models::{
    ChangeValue, Metadata, TextBody, WhatsappChange, WhatsappEntry, WhatsappMessage,
    WhatsappWebhook,
};

#[utoipa::path(
    get,
    path = "/whatsapp/webhook", // Path relative to /api
    params(
        ("hub.mode" = String, Query, description = "Always `subscribe`"),
        ("hub.verify_token" = String, Query, description = "Token configured in the Meta app"),
        ("hub.challenge" = String, Query, description = "Value to echo back"),
    ),
    responses(
        (status = 200, description = "Challenge echoed back", body = String, content_type = "text/plain"),
        (status = 400, description = "hub.mode or hub.verify_token missing"),
        (status = 403, description = "Verify token mismatch")
    ),
    tag = "WhatsApp"
)]
fn doc_verify_webhook_handler() {}

#[utoipa::path(
    post,
    path = "/whatsapp/webhook", // Path relative to /api
    request_body(content = WhatsappWebhook, example = json!({
        "object": "whatsapp_business_account",
        "entry": [{
            "id": "WABA_ID",
            "changes": [{
                "field": "messages",
                "value": {
                    "messaging_product": "whatsapp",
                    "metadata": {"display_phone_number": "15550000000", "phone_number_id": "PHONE_ID"},
                    "messages": [{
                        "from": "5215512345678",
                        "id": "wamid.HBgM",
                        "timestamp": "1720000000",
                        "type": "text",
                        "text": {"body": "Hola, quiero agendar una cita para mañana a las 10am."}
                    }]
                }
            }]
        }]
    })),
    responses(
        (status = 200, description = "Notification acknowledged", body = String, example = json!("EVENT_RECEIVED")),
        (status = 400, description = "Body is not JSON"),
        (status = 403, description = "X-Hub-Signature-256 mismatch")
    ),
    tag = "WhatsApp"
)]
fn doc_webhook_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_verify_webhook_handler, doc_webhook_handler),
    components(schemas(
        WhatsappWebhook,
        WhatsappEntry,
        WhatsappChange,
        ChangeValue,
        Metadata,
        WhatsappMessage,
        TextBody
    )),
    tags((name = "WhatsApp", description = "WhatsApp Cloud API webhook"))
)]
pub struct WhatsappApiDoc;
