#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Operator asked to process text (typed, pasted or loaded from a file).
    SubmitText { text: String, source_label: String },
    /// Operator changed the server address.
    ConfigureEndpoint { host: String, port: u16 },
    /// Operator asked whether the server is up.
    CheckHealth,
    /// Dispatcher finished a processing call.
    DispatchCompleted {
        session_id: crate::SessionId,
        outcome: crate::Outcome,
    },
    /// Dispatcher finished a health check.
    HealthCompleted {
        session_id: crate::SessionId,
        health: crate::HealthOutcome,
    },
    /// Window is closing; cancel in-flight work.
    Teardown,
}
