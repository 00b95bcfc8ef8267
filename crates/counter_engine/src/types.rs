use std::fmt;

use counter_core::{HealthOutcome, Outcome, SessionId};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    DispatchCompleted {
        session_id: SessionId,
        outcome: Outcome,
    },
    HealthCompleted {
        session_id: SessionId,
        health: HealthOutcome,
    },
}

impl EngineEvent {
    pub fn session_id(&self) -> SessionId {
        match self {
            EngineEvent::DispatchCompleted { session_id, .. }
            | EngineEvent::HealthCompleted { session_id, .. } => *session_id,
        }
    }
}

/// Raw result of one HTTP call, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpExchange {
    Response { status: u16, body: String },
    Transport(TransportError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// No response: DNS failure, refused or dropped connection.
    Connect,
    Timeout,
    /// Anything else, e.g. the body could not be read after the headers.
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::Connect => write!(f, "connect"),
            TransportErrorKind::Timeout => write!(f, "timeout"),
            TransportErrorKind::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    ClientBuild(String),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to spawn dispatch worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}
