// --- File: crates/citabot_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Handlers and the appointment processor depend on these traits rather than on
//! the Google or Graph API clients, so tests can swap in the recording doubles
//! from [`mock`].

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::models::{CalendarEvent, CalendarEventResult, Channel, DeliveryResult};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Calendar operations used by the appointment processor.
///
/// Implementations are bound to one calendar; the calendar id is part of
/// their configuration, not of each call.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: StdError + Send + Sync + 'static;

    /// Insert a new event.
    fn insert_event(&self, event: CalendarEvent) -> BoxFuture<'_, CalendarEventResult, Self::Error>;

    /// Replace an existing event.
    fn update_event(
        &self,
        event_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error>;

    /// Delete an existing event.
    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), Self::Error>;
}

/// Outbound text replies on a messaging channel.
pub trait MessageSender: Send + Sync {
    /// Error type returned by send operations.
    type Error: StdError + Send + Sync + 'static;

    /// The channel this sender delivers to.
    fn channel(&self) -> Channel;

    /// Send `text` to `recipient` (PSID or phone number).
    fn send_text(&self, recipient: &str, text: &str) -> BoxFuture<'_, DeliveryResult, Self::Error>;
}

// Shared handles forward to the wrapped service.
impl<T: CalendarService> CalendarService for Arc<T> {
    type Error = T::Error;

    fn insert_event(
        &self,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        self.as_ref().insert_event(event)
    }

    fn update_event(
        &self,
        event_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        self.as_ref().update_event(event_id, event)
    }

    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), Self::Error> {
        self.as_ref().delete_event(event_id)
    }
}

impl<T: MessageSender> MessageSender for Arc<T> {
    type Error = T::Error;

    fn channel(&self) -> Channel {
        self.as_ref().channel()
    }

    fn send_text(
        &self,
        recipient: &str,
        text: &str,
    ) -> BoxFuture<'_, DeliveryResult, Self::Error> {
        self.as_ref().send_text(recipient, text)
    }
}

/// Shared calendar service handle with an erased error type.
pub type DynCalendarService = Arc<dyn CalendarService<Error = BoxedError>>;

/// Shared message sender handle with an erased error type.
pub type DynMessageSender = Arc<dyn MessageSender<Error = BoxedError>>;

fn boxed<E: StdError + Send + Sync + 'static>(err: E) -> BoxedError {
    BoxedError(Box::new(err))
}

/// Adapter that erases a concrete calendar service's error type.
pub struct BoxedCalendarService<S>(pub S);

impl<S: CalendarService> CalendarService for BoxedCalendarService<S> {
    type Error = BoxedError;

    fn insert_event(&self, event: CalendarEvent) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let fut = self.0.insert_event(event);
        Box::pin(async move { fut.await.map_err(boxed) })
    }

    fn update_event(
        &self,
        event_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let fut = self.0.update_event(event_id, event);
        Box::pin(async move { fut.await.map_err(boxed) })
    }

    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), Self::Error> {
        let fut = self.0.delete_event(event_id);
        Box::pin(async move { fut.await.map_err(boxed) })
    }
}

/// Adapter that erases a concrete sender's error type.
pub struct BoxedMessageSender<S>(pub S);

impl<S: MessageSender> MessageSender for BoxedMessageSender<S> {
    type Error = BoxedError;

    fn channel(&self) -> Channel {
        self.0.channel()
    }

    fn send_text(&self, recipient: &str, text: &str) -> BoxFuture<'_, DeliveryResult, Self::Error> {
        let fut = self.0.send_text(recipient, text);
        Box::pin(async move { fut.await.map_err(boxed) })
    }
}

/// Wraps a calendar service into a shareable, error-erased handle.
pub fn into_dyn_calendar<S: CalendarService + 'static>(service: S) -> DynCalendarService {
    Arc::new(BoxedCalendarService(service))
}

/// Wraps a sender into a shareable, error-erased handle.
pub fn into_dyn_sender<S: MessageSender + 'static>(sender: S) -> DynMessageSender {
    Arc::new(BoxedMessageSender(sender))
}

/// Recording doubles for tests in this and downstream crates.
#[cfg(any(test, feature = "test-util"))]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("mock service failure: {0}")]
    pub struct MockServiceError(pub String);

    /// One recorded calendar call with its arguments.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum CalendarCall {
        Insert(CalendarEvent),
        Update { event_id: String, event: CalendarEvent },
        Delete { event_id: String },
    }

    /// Calendar service that records every call and answers with canned results.
    #[derive(Default)]
    pub struct RecordingCalendarService {
        calls: Mutex<Vec<CalendarCall>>,
        fail_with: Option<String>,
    }

    impl RecordingCalendarService {
        pub fn new() -> Self {
            Self::default()
        }

        /// Records calls but fails every one of them with `message`.
        pub fn failing(message: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Some(message.to_string()),
            }
        }

        pub fn calls(&self) -> Vec<CalendarCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn insert_calls(&self) -> Vec<CalendarEvent> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    CalendarCall::Insert(event) => Some(event),
                    _ => None,
                })
                .collect()
        }

        pub fn update_calls(&self) -> Vec<(String, CalendarEvent)> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    CalendarCall::Update { event_id, event } => Some((event_id, event)),
                    _ => None,
                })
                .collect()
        }

        pub fn delete_calls(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    CalendarCall::Delete { event_id } => Some(event_id),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, call: CalendarCall) -> Result<(), MockServiceError> {
            self.calls.lock().unwrap().push(call);
            match &self.fail_with {
                Some(message) => Err(MockServiceError(message.clone())),
                None => Ok(()),
            }
        }
    }

    impl CalendarService for RecordingCalendarService {
        type Error = MockServiceError;

        fn insert_event(
            &self,
            event: CalendarEvent,
        ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
            let outcome = self.record(CalendarCall::Insert(event));
            Box::pin(async move {
                outcome?;
                Ok(CalendarEventResult {
                    event_id: Some("mock_event_id".to_string()),
                    status: "confirmed".to_string(),
                })
            })
        }

        fn update_event(
            &self,
            event_id: &str,
            event: CalendarEvent,
        ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
            let event_id = event_id.to_string();
            let outcome = self.record(CalendarCall::Update {
                event_id: event_id.clone(),
                event,
            });
            Box::pin(async move {
                outcome?;
                Ok(CalendarEventResult {
                    event_id: Some(event_id),
                    status: "confirmed".to_string(),
                })
            })
        }

        fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), Self::Error> {
            let outcome = self.record(CalendarCall::Delete {
                event_id: event_id.to_string(),
            });
            Box::pin(async move { outcome })
        }
    }

    /// Sender that records every reply instead of calling a platform API.
    pub struct RecordingMessageSender {
        channel: Channel,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingMessageSender {
        pub fn new(channel: Channel) -> Self {
            Self {
                channel,
                sent: Mutex::new(Vec::new()),
            }
        }

        /// `(recipient, text)` pairs in send order.
        pub fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl MessageSender for RecordingMessageSender {
        type Error = MockServiceError;

        fn channel(&self) -> Channel {
            self.channel
        }

        fn send_text(
            &self,
            recipient: &str,
            text: &str,
        ) -> BoxFuture<'_, DeliveryResult, Self::Error> {
            self.sent
                .lock()
                .unwrap()
                .push((recipient.to_string(), text.to_string()));
            Box::pin(async move {
                Ok(DeliveryResult {
                    message_id: None,
                    chunks: 1,
                })
            })
        }
    }

}

#[cfg(test)]
mod tests {
    use super::mock::{CalendarCall, RecordingCalendarService};
    use super::*;
    use crate::models::EventTime;

    fn event(summary: &str) -> CalendarEvent {
        CalendarEvent {
            id: None,
            summary: summary.to_string(),
            description: None,
            start: EventTime::new("2025-07-21T10:00:00-03:00", "America/Argentina/Buenos_Aires"),
            end: EventTime::new("2025-07-21T11:00:00-03:00", "America/Argentina/Buenos_Aires"),
        }
    }

    #[tokio::test]
    async fn test_boxed_service_forwards_calls() {
        let recorder = Arc::new(RecordingCalendarService::new());
        let service = into_dyn_calendar(recorder.clone());

        let created = service.insert_event(event("Cita agendada")).await.unwrap();
        assert_eq!(created.event_id.as_deref(), Some("mock_event_id"));
        service.delete_event("evento_a_cancelar_id").await.unwrap();

        assert_eq!(
            recorder.calls(),
            vec![
                CalendarCall::Insert(event("Cita agendada")),
                CalendarCall::Delete {
                    event_id: "evento_a_cancelar_id".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_boxed_service_erases_error() {
        let service = into_dyn_calendar(RecordingCalendarService::failing("quota exceeded"));
        let err = service
            .update_event("evento_a_modificar_id", event("Cita modificada"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "mock service failure: quota exceeded");
    }
}
