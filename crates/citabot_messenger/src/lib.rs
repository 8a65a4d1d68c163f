// --- File: crates/citabot_messenger/src/lib.rs ---
pub mod doc;
pub mod error;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod models;
pub mod routes;
pub mod sender;
pub mod split;

pub use error::MessengerError;
pub use handlers::MessengerState;
pub use routes::routes;
pub use sender::MessengerSender;
