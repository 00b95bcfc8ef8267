//! Counter engine: HTTP calls to the counting service, response
//! classification, and the dispatcher that keeps them off the caller's thread.
mod classify;
mod client;
mod dispatcher;
mod session;
mod types;

pub use classify::{classify, classify_health, UNKNOWN_ERROR_MESSAGE};
pub use client::{ClientSettings, ReqwestServiceClient, ServiceClient};
pub use dispatcher::Dispatcher;
pub use session::ClientSession;
pub use types::{EngineError, EngineEvent, HttpExchange, TransportError, TransportErrorKind};
