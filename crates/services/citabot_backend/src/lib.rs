// --- File: crates/services/citabot_backend/src/lib.rs ---
pub mod app_state;
pub mod router;
pub mod service_factory;

pub use app_state::{AppState, AppStateBuilder};
pub use router::build_router;
pub use service_factory::CitabotServiceFactory;
