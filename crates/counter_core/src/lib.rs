//! Counter client core: request model, outcome rendering and the pure session
//! state machine that sits between the operator and the dispatcher.
mod coordinator;
mod effect;
mod endpoint;
mod msg;
mod outcome;
pub mod report;
mod request;
mod state;
mod update;
mod view_model;

pub use coordinator::UiCoordinator;
pub use effect::Effect;
pub use endpoint::{EndpointError, ServerEndpoint, DEFAULT_HOST, DEFAULT_PORT};
pub use msg::Msg;
pub use outcome::{FailureCategory, HealthOutcome, Outcome, ProcessingFailure, ProcessingStats};
pub use request::{build, file_source_label, text_source_label, ProcessingRequest, RejectedInput};
pub use state::{AppState, SessionId, SessionKind};
pub use update::update;
pub use view_model::AppViewModel;
