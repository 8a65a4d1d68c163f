// --- File: crates/citabot_appointments/src/processor.rs ---
use citabot_common::{log_error, DynCalendarService, DynMessageSender, InboundMessage};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::error::AppointmentError;
use crate::intent::{classify, Intent};
use crate::planner::AppointmentPlanner;

/// What happened to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProcessingOutcome {
    Created { event_id: Option<String> },
    Modified { event_id: String },
    Cancelled { event_id: String },
    Ignored { reason: String },
}

impl ProcessingOutcome {
    /// Reply to send back to the user.
    pub fn reply_text(&self) -> &'static str {
        match self {
            ProcessingOutcome::Created { .. } => "¡Listo! Tu cita quedó agendada.",
            ProcessingOutcome::Modified { .. } => "Tu cita fue modificada.",
            ProcessingOutcome::Cancelled { .. } => "Tu cita fue cancelada.",
            ProcessingOutcome::Ignored { .. } => {
                "No entendí tu mensaje. Puedo agendar, cambiar o cancelar una cita."
            }
        }
    }
}

/// Reply sent when the calendar call failed.
pub const FAILURE_REPLY: &str =
    "No pude completar la operación con tu cita. Por favor, intentá de nuevo más tarde.";

/// Turns inbound messages into calendar operations.
pub struct AppointmentProcessor {
    planner: AppointmentPlanner,
    calendar: DynCalendarService,
}

impl AppointmentProcessor {
    pub fn new(planner: AppointmentPlanner, calendar: DynCalendarService) -> Self {
        Self { planner, calendar }
    }

    pub fn planner(&self) -> &AppointmentPlanner {
        &self.planner
    }

    /// Classifies the message and issues at most one calendar call.
    #[instrument(skip(self, message), fields(channel = %message.channel, sender = %message.sender_id))]
    pub async fn process(
        &self,
        message: &InboundMessage,
    ) -> Result<ProcessingOutcome, AppointmentError> {
        let intent = classify(&message.text);
        info!("Message classified as {}", intent);

        match intent {
            Intent::Create => {
                let event = self.planner.create(message);
                let created = self
                    .calendar
                    .insert_event(event)
                    .await
                    .map_err(AppointmentError::Calendar)?;
                Ok(ProcessingOutcome::Created {
                    event_id: created.event_id,
                })
            }
            Intent::Modify => {
                let (event_id, event) = self.planner.modify(message);
                self.calendar
                    .update_event(&event_id, event)
                    .await
                    .map_err(AppointmentError::Calendar)?;
                Ok(ProcessingOutcome::Modified { event_id })
            }
            Intent::Cancel => {
                let event_id = self.planner.cancel(message);
                self.calendar
                    .delete_event(&event_id)
                    .await
                    .map_err(AppointmentError::Calendar)?;
                Ok(ProcessingOutcome::Cancelled { event_id })
            }
            Intent::Unknown => Ok(ProcessingOutcome::Ignored {
                reason: "no appointment keyword".to_string(),
            }),
        }
    }

    /// Processes a message and, when a sender is wired, replies to the user.
    ///
    /// Calendar and reply failures are logged, never returned: the webhook
    /// acknowledges the delivery either way.
    pub async fn handle(
        &self,
        message: &InboundMessage,
        sender: Option<&DynMessageSender>,
    ) -> Option<ProcessingOutcome> {
        let (outcome, reply) = match self.process(message).await {
            Ok(outcome) => {
                let reply = outcome.reply_text();
                (Some(outcome), reply)
            }
            Err(err) => {
                log_error(&err, "Failed to process appointment message");
                (None, FAILURE_REPLY)
            }
        };

        match sender {
            Some(sender) => {
                if let Err(err) = sender.send_text(&message.sender_id, reply).await {
                    log_error(err, &format!("Failed to reply on {}", sender.channel()));
                }
            }
            None => warn!("No {} sender configured, reply not sent", message.channel),
        }
        outcome
    }
}
