// --- File: crates/services/citabot_backend/src/router.rs ---
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
#[allow(unused_imports)] // used depending on the enabled features
use tracing::{info, warn};

use crate::app_state::AppState;

async fn welcome() -> &'static str {
    "Welcome to Citabot API!"
}

async fn health() -> &'static str {
    "OK"
}

/// Builds the whole HTTP surface: `/api/*` plus the Swagger UI when the
/// `openapi` feature is on.
///
/// A channel's webhook is mounted when its feature is compiled in, it is
/// enabled in config, and a processor exists.
pub fn build_router(state: &AppState) -> Router {
    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut api = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health));

    #[cfg(feature = "messenger")]
    if citabot_common::is_messenger_enabled(&state.config) {
        match (state.processor.as_ref(), state.config.messenger.as_ref()) {
            (Some(processor), Some(messenger_config)) => {
                api = api.merge(citabot_messenger::routes(
                    messenger_config.clone(),
                    processor.clone(),
                    state.messenger_sender.clone(),
                ));
                info!("Messenger webhook mounted at /api/messenger/webhook");
            }
            _ => warn!("Messenger enabled but no calendar service, webhook not mounted"),
        }
    }

    #[cfg(feature = "whatsapp")]
    if citabot_common::is_whatsapp_enabled(&state.config) {
        match (state.processor.as_ref(), state.config.whatsapp.as_ref()) {
            (Some(processor), Some(whatsapp_config)) => {
                api = api.merge(citabot_whatsapp::routes(
                    whatsapp_config.clone(),
                    processor.clone(),
                    state.whatsapp_sender.clone(),
                ));
                info!("WhatsApp webhook mounted at /api/whatsapp/webhook");
            }
            _ => warn!("WhatsApp enabled but no calendar service, webhook not mounted"),
        }
    }

    #[allow(unused_mut)]
    let mut app = Router::new().nest("/api", api);

    #[cfg(feature = "openapi")]
    {
        app = app.merge(api_doc::swagger_ui());
    }

    app.layer(TraceLayer::new_for_http())
}

#[cfg(feature = "openapi")]
mod api_doc {
    #![allow(dead_code)]
    #[cfg(feature = "messenger")]
    use citabot_messenger::doc::MessengerApiDoc;
    #[cfg(feature = "whatsapp")]
    use citabot_whatsapp::doc::WhatsappApiDoc;
    use tracing::info;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    #[utoipa::path(
        get,
        path = "/health", // Path relative to /api
        responses((status = 200, description = "Service is up", body = String, example = json!("OK"))),
        tag = "Citabot"
    )]
    fn doc_health() {}

    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Citabot API",
            version = "0.1.0",
            description = "Appointment chatbot webhooks",
            license(name = "MIT", url = "https://opensource.org/licenses/MIT")
        ),
        paths(doc_health),
        tags((name = "Citabot", description = "Core service endpoints")),
        servers((url = "/api", description = "Main API Prefix")),
    )]
    struct ApiDoc;

    pub fn swagger_ui() -> SwaggerUi {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "messenger")]
        openapi_doc.merge(MessengerApiDoc::openapi());
        #[cfg(feature = "whatsapp")]
        openapi_doc.merge(WhatsappApiDoc::openapi());

        info!("Adding Swagger UI at /api/docs");
        SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc)
    }
}
