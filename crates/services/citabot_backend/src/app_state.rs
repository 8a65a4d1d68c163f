// --- File: crates/services/citabot_backend/src/app_state.rs ---
use citabot_appointments::{AppointmentError, AppointmentPlanner, AppointmentProcessor};
use citabot_common::{DynCalendarService, DynMessageSender};
use citabot_config::AppConfig;
use std::sync::Arc;
use tracing::warn;

/// Everything the router needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` when no calendar backend is available; webhook routes are then
    /// left out of the router.
    pub processor: Option<Arc<AppointmentProcessor>>,
    pub messenger_sender: Option<DynMessageSender>,
    pub whatsapp_sender: Option<DynMessageSender>,
}

/// Builder for [`AppState`]. The production path feeds it from
/// [`crate::CitabotServiceFactory`]; tests plug in recording doubles.
pub struct AppStateBuilder {
    config: Arc<AppConfig>,
    calendar_service: Option<DynCalendarService>,
    messenger_sender: Option<DynMessageSender>,
    whatsapp_sender: Option<DynMessageSender>,
}

impl AppStateBuilder {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            calendar_service: None,
            messenger_sender: None,
            whatsapp_sender: None,
        }
    }

    pub fn with_calendar_service(mut self, calendar_service: Option<DynCalendarService>) -> Self {
        self.calendar_service = calendar_service;
        self
    }

    pub fn with_messenger_sender(mut self, sender: Option<DynMessageSender>) -> Self {
        self.messenger_sender = sender;
        self
    }

    pub fn with_whatsapp_sender(mut self, sender: Option<DynMessageSender>) -> Self {
        self.whatsapp_sender = sender;
        self
    }

    /// Fails only when the `appointments` section is invalid.
    pub fn build(self) -> Result<AppState, AppointmentError> {
        let processor = match self.calendar_service {
            Some(calendar) => {
                let planner = AppointmentPlanner::from_config(&self.config.appointments)?;
                Some(Arc::new(AppointmentProcessor::new(planner, calendar)))
            }
            None => {
                warn!("No calendar service available, appointment webhooks disabled");
                None
            }
        };

        Ok(AppState {
            config: self.config,
            processor,
            messenger_sender: self.messenger_sender,
            whatsapp_sender: self.whatsapp_sender,
        })
    }
}
