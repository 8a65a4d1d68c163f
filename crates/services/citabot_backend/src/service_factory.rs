// --- File: crates/services/citabot_backend/src/service_factory.rs ---
//! Builds the external services from configuration.
//!
//! Each integration is created only when its cargo feature is compiled in,
//! its `use_*` flag is set and its config section is present. Failures are
//! logged and leave that integration out; startup continues.
use citabot_appointments::AppointmentError;
use citabot_common::{DynCalendarService, DynMessageSender};
use citabot_config::AppConfig;
use std::sync::Arc;
#[allow(unused_imports)] // used depending on the enabled features
use {
    citabot_common::{into_dyn_calendar, into_dyn_sender, is_feature_enabled},
    tracing::{error, info, warn},
};

use crate::app_state::{AppState, AppStateBuilder};

#[cfg(feature = "gcal")]
use citabot_gcal::{create_calendar_hub, GoogleCalendarService};

#[cfg(feature = "messenger")]
use citabot_messenger::MessengerSender;

#[cfg(feature = "whatsapp")]
use citabot_whatsapp::WhatsappSender;

pub struct CitabotServiceFactory {
    config: Arc<AppConfig>,
    calendar_service: Option<DynCalendarService>,
    messenger_sender: Option<DynMessageSender>,
    whatsapp_sender: Option<DynMessageSender>,
}

impl CitabotServiceFactory {
    pub async fn new(config: Arc<AppConfig>) -> Self {
        #[allow(unused_mut)]
        let mut factory = Self {
            config: config.clone(),
            calendar_service: None,
            messenger_sender: None,
            whatsapp_sender: None,
        };

        #[cfg(feature = "gcal")]
        if let Some(gcal_config) = config
            .gcal
            .as_ref()
            .filter(|gcal| is_feature_enabled(config.use_gcal, Some(gcal)))
        {
            info!("Initializing Google Calendar service...");
            match create_calendar_hub(gcal_config).await {
                Ok(hub) => {
                    let service =
                        GoogleCalendarService::new(Arc::new(hub), gcal_config.calendar_id.clone());
                    factory.calendar_service = Some(into_dyn_calendar(service));
                    info!("Google Calendar service ready for '{}'", gcal_config.calendar_id);
                }
                Err(e) => error!("Failed to initialize Google Calendar: {}", e),
            }
        }

        #[cfg(feature = "messenger")]
        if is_feature_enabled(config.use_messenger, config.messenger.as_ref()) {
            if let Some(messenger_config) = config.messenger.as_ref() {
                match MessengerSender::from_config(messenger_config) {
                    Ok(sender) => factory.messenger_sender = Some(into_dyn_sender(sender)),
                    Err(e) => warn!("Messenger replies disabled: {}", e),
                }
            }
        }

        #[cfg(feature = "whatsapp")]
        if is_feature_enabled(config.use_whatsapp, config.whatsapp.as_ref()) {
            if let Some(whatsapp_config) = config.whatsapp.as_ref() {
                match WhatsappSender::from_config(whatsapp_config) {
                    Ok(sender) => factory.whatsapp_sender = Some(into_dyn_sender(sender)),
                    Err(e) => warn!("WhatsApp replies disabled: {}", e),
                }
            }
        }

        factory
    }

    pub fn calendar_service(&self) -> Option<DynCalendarService> {
        self.calendar_service.clone()
    }

    pub fn messenger_sender(&self) -> Option<DynMessageSender> {
        self.messenger_sender.clone()
    }

    pub fn whatsapp_sender(&self) -> Option<DynMessageSender> {
        self.whatsapp_sender.clone()
    }

    /// Assembles the router state from the services created above.
    pub fn into_app_state(self) -> Result<AppState, AppointmentError> {
        AppStateBuilder::new(self.config)
            .with_calendar_service(self.calendar_service)
            .with_messenger_sender(self.messenger_sender)
            .with_whatsapp_sender(self.whatsapp_sender)
            .build()
    }
}
