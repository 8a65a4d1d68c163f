// --- File: crates/citabot_common/src/lib.rs ---

pub mod error;
pub mod features;
pub mod http;
pub mod logging;
pub mod models;
pub mod services;
pub mod webhook;

pub use error::{
    config_error, external_service_error, forbidden, not_found, validation_error, CitabotError,
    HttpStatusCode,
};

pub use http::client::HTTP_CLIENT;

pub use logging::{init_with_config, log_error};

pub use models::{CalendarEvent, CalendarEventResult, Channel, DeliveryResult, EventTime, InboundMessage};

pub use services::{
    into_dyn_calendar, into_dyn_sender, BoxFuture, BoxedError, CalendarService, DynCalendarService,
    DynMessageSender, MessageSender,
};

pub use features::is_feature_enabled;

#[cfg(feature = "gcal")]
pub use features::is_gcal_enabled;

#[cfg(feature = "messenger")]
pub use features::is_messenger_enabled;

#[cfg(feature = "whatsapp")]
pub use features::is_whatsapp_enabled;
