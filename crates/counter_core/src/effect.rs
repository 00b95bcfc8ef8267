use crate::{ProcessingRequest, ServerEndpoint, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Controls go disabled; always emitted before the matching dispatch.
    NotifyStarted { session_id: SessionId, status: String },
    Dispatch {
        session_id: SessionId,
        endpoint: ServerEndpoint,
        request: ProcessingRequest,
    },
    CheckHealth {
        session_id: SessionId,
        endpoint: ServerEndpoint,
    },
    /// Controls go enabled again; rendered report and status line.
    NotifyOutcome {
        session_id: SessionId,
        report: String,
        status: String,
    },
    ShowRejection { message: String },
    ShowNotice { report: String, status: String },
    /// Teardown: abort whatever is running and deliver nothing further.
    CancelInFlight,
}
