pub mod error;
pub mod fallback;
pub mod handler;
pub mod server;

pub use error::ProxyError;
pub use server::{router, serve, AppState};
