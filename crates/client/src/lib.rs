pub mod api;
pub mod cache;
pub mod controller;
pub mod debounce;
pub mod notification;

pub use api::{ApiClient, TransportError};
pub use cache::CommandCache;
pub use controller::CommandsController;
