use crate::SessionId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub endpoint_url: String,
    /// False while a session is in flight or after teardown.
    pub controls_enabled: bool,
    pub in_flight: Option<SessionId>,
    pub report: String,
    pub status: String,
}
