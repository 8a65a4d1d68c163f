pub mod doc;
pub mod error;
pub mod handlers;
pub mod models;
pub mod phone;
pub mod routes;
pub mod sender;

pub use error::WhatsappError;
pub use handlers::WhatsappState;
pub use routes::routes;
pub use sender::WhatsappSender;
