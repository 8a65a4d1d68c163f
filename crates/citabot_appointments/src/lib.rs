// --- File: crates/citabot_appointments/src/lib.rs ---
pub mod error;
pub mod intent;
#[cfg(test)]
mod intent_proptest;
pub mod planner;
pub mod processor;

pub use error::AppointmentError;
pub use intent::{classify, Intent};
pub use planner::AppointmentPlanner;
pub use processor::{AppointmentProcessor, ProcessingOutcome, FAILURE_REPLY};
