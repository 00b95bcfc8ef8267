#![allow(dead_code)]

use std::sync::Once;

use counter_core::{ServerEndpoint, UiCoordinator};
use counter_engine::{ClientSession, ClientSettings, Dispatcher};
use wiremock::MockServer;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(counter_logging::initialize_for_tests);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Started(String),
    Outcome { report: String, status: String },
    Rejected(String),
    Notice { report: String, status: String },
}

/// Records every coordinator callback in call order.
#[derive(Debug, Default)]
pub struct RecordingCoordinator {
    pub events: Vec<UiEvent>,
}

impl RecordingCoordinator {
    pub fn outcomes(&self) -> Vec<&UiEvent> {
        self.events
            .iter()
            .filter(|event| matches!(event, UiEvent::Outcome { .. }))
            .collect()
    }

    pub fn last_report(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            UiEvent::Outcome { report, .. } => Some(report.as_str()),
            _ => None,
        })
    }
}

impl UiCoordinator for RecordingCoordinator {
    fn on_dispatch_started(&mut self, status: &str) {
        self.events.push(UiEvent::Started(status.to_string()));
    }

    fn on_outcome(&mut self, report: &str, status: &str) {
        self.events.push(UiEvent::Outcome {
            report: report.to_string(),
            status: status.to_string(),
        });
    }

    fn on_rejected(&mut self, message: &str) {
        self.events.push(UiEvent::Rejected(message.to_string()));
    }

    fn on_notice(&mut self, report: &str, status: &str) {
        self.events.push(UiEvent::Notice {
            report: report.to_string(),
            status: status.to_string(),
        });
    }
}

/// The mock server runs on its own runtime so the session under test can block
/// the test thread the way a real front-end loop would.
pub fn start_server(runtime: &tokio::runtime::Runtime) -> MockServer {
    runtime.block_on(MockServer::start())
}

pub fn endpoint_for(server: &MockServer) -> ServerEndpoint {
    ServerEndpoint::new("127.0.0.1", server.address().port()).expect("valid endpoint")
}

pub fn session_for(
    endpoint: ServerEndpoint,
    settings: ClientSettings,
) -> ClientSession<RecordingCoordinator> {
    let dispatcher = Dispatcher::new(settings).expect("dispatcher");
    ClientSession::with_dispatcher(dispatcher, endpoint, RecordingCoordinator::default())
}

pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().expect("local addr").port()
}
