use crate::report;
use crate::view_model::AppViewModel;
use crate::ServerEndpoint;

/// Monotonic identifier of one dispatch session (processing or health check).
pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Processing,
    HealthCheck,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InFlight {
    pub(crate) session_id: SessionId,
    pub(crate) kind: SessionKind,
    pub(crate) source_label: String,
    /// Base URL captured when the session started, used by health reports.
    pub(crate) base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    endpoint: ServerEndpoint,
    next_session_id: SessionId,
    in_flight: Option<InFlight>,
    torn_down: bool,
    report: String,
    status: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_endpoint(ServerEndpoint::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(endpoint: ServerEndpoint) -> Self {
        let (report, status) = report::render_welcome(&endpoint.base_url());
        Self {
            endpoint,
            next_session_id: 1,
            in_flight: None,
            torn_down: false,
            report,
            status,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            endpoint_url: self.endpoint.base_url(),
            controls_enabled: self.in_flight.is_none() && !self.torn_down,
            in_flight: self.in_flight.as_ref().map(|session| session.session_id),
            report: self.report.clone(),
            status: self.status.clone(),
        }
    }

    pub fn endpoint(&self) -> &ServerEndpoint {
        &self.endpoint
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub(crate) fn set_endpoint(&mut self, endpoint: ServerEndpoint) {
        self.endpoint = endpoint;
    }

    pub(crate) fn begin_session(
        &mut self,
        kind: SessionKind,
        source_label: impl Into<String>,
    ) -> SessionId {
        let session_id = self.next_session_id;
        self.next_session_id += 1;
        self.in_flight = Some(InFlight {
            session_id,
            kind,
            source_label: source_label.into(),
            base_url: self.endpoint.base_url(),
        });
        session_id
    }

    /// Ends the session only when `session_id` is the one in flight.
    pub(crate) fn finish_session(
        &mut self,
        session_id: SessionId,
        kind: SessionKind,
    ) -> Option<InFlight> {
        match &self.in_flight {
            Some(current) if current.session_id == session_id && current.kind == kind => {
                self.in_flight.take()
            }
            _ => None,
        }
    }

    pub(crate) fn tear_down(&mut self) -> Option<InFlight> {
        self.torn_down = true;
        self.in_flight.take()
    }

    pub(crate) fn set_display(&mut self, report: Option<String>, status: String) {
        if let Some(report) = report {
            self.report = report;
        }
        self.status = status;
    }
}
