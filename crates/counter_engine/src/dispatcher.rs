use std::panic::AssertUnwindSafe;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use counter_core::{
    FailureCategory, HealthOutcome, Outcome, ProcessingFailure, ProcessingRequest, ServerEndpoint,
    SessionId,
};
use counter_logging::{counter_debug, counter_info, counter_warn};
use futures_util::FutureExt;
use tokio::task::AbortHandle;

use crate::classify::{classify, classify_health};
use crate::client::{ChannelEventSink, EventSink, ServiceClient};
use crate::{ClientSettings, EngineError, EngineEvent, ReqwestServiceClient};

const RUNTIME_SHUTDOWN_GRACE: Duration = Duration::from_secs(2);
const WORKER_UNAVAILABLE: &str = "despachante indisponível";

enum DispatchCommand {
    Process {
        session_id: SessionId,
        endpoint: ServerEndpoint,
        request: ProcessingRequest,
    },
    Health {
        session_id: SessionId,
        endpoint: ServerEndpoint,
    },
    Shutdown,
}

/// Runs HTTP calls off the calling thread. Each command yields exactly one
/// [`EngineEvent`], unless [`Dispatcher::shutdown`] aborts it first, in which
/// case it yields none. A command sent after the worker stopped yields an
/// Unexpected failure.
pub struct Dispatcher {
    cmd_tx: mpsc::Sender<DispatchCommand>,
    /// Kept so a command the worker can no longer accept still gets its event.
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: mpsc::Receiver<EngineEvent>,
    worker: Option<thread::JoinHandle<()>>,
}

impl Dispatcher {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let client = ReqwestServiceClient::new(settings)?;
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn ServiceClient>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("counter-dispatch-rt")
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;

        let worker = thread::Builder::new()
            .name("counter-dispatch".to_string())
            .spawn({
                let event_tx = event_tx.clone();
                move || run_worker(runtime, client, cmd_rx, event_tx)
            })
            .map_err(EngineError::WorkerSpawn)?;

        Ok(Self {
            cmd_tx,
            event_tx,
            event_rx,
            worker: Some(worker),
        })
    }

    pub fn dispatch(
        &self,
        session_id: SessionId,
        endpoint: ServerEndpoint,
        request: ProcessingRequest,
    ) {
        self.send(DispatchCommand::Process {
            session_id,
            endpoint,
            request,
        });
    }

    pub fn check_health(&self, session_id: SessionId, endpoint: ServerEndpoint) {
        self.send(DispatchCommand::Health {
            session_id,
            endpoint,
        });
    }

    fn send(&self, command: DispatchCommand) {
        if let Err(mpsc::SendError(command)) = self.cmd_tx.send(command) {
            counter_warn!("dispatch worker is gone; failing command");
            if let Some(event) = unavailable_event(command) {
                let _ = self.event_tx.send(event);
            }
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Aborts in-flight calls, stops the runtime and joins the worker thread.
    /// Events produced before the abort are discarded. Safe to call twice.
    pub fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = self.cmd_tx.send(DispatchCommand::Shutdown);
        if worker.join().is_err() {
            counter_warn!("dispatch worker panicked during shutdown");
        }
        let discarded = self.event_rx.try_iter().count();
        if discarded > 0 {
            counter_debug!("discarded {} events after shutdown", discarded);
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn unavailable_event(command: DispatchCommand) -> Option<EngineEvent> {
    match command {
        DispatchCommand::Process { session_id, .. } => Some(EngineEvent::DispatchCompleted {
            session_id,
            outcome: Outcome::Failure(ProcessingFailure::new(
                FailureCategory::Unexpected,
                format!("Erro inesperado: {WORKER_UNAVAILABLE}"),
            )),
        }),
        DispatchCommand::Health { session_id, .. } => Some(EngineEvent::HealthCompleted {
            session_id,
            health: HealthOutcome::Unreachable {
                category: FailureCategory::Unexpected,
                message: WORKER_UNAVAILABLE.to_string(),
            },
        }),
        DispatchCommand::Shutdown => None,
    }
}

fn run_worker(
    runtime: tokio::runtime::Runtime,
    client: Arc<dyn ServiceClient>,
    cmd_rx: mpsc::Receiver<DispatchCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut in_flight: Vec<AbortHandle> = Vec::new();

    while let Ok(command) = cmd_rx.recv() {
        in_flight.retain(|handle| !handle.is_finished());
        if matches!(command, DispatchCommand::Shutdown) {
            break;
        }
        let client = client.clone();
        let sink = ChannelEventSink::new(event_tx.clone());
        let task = runtime.spawn(async move {
            run_command(client.as_ref(), command, &sink).await;
        });
        in_flight.push(task.abort_handle());
    }

    let pending = in_flight
        .iter()
        .filter(|handle| !handle.is_finished())
        .count();
    if pending > 0 {
        counter_info!("aborting {} in-flight dispatches", pending);
    }
    for handle in &in_flight {
        handle.abort();
    }
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_GRACE);
}

/// Emits exactly one event for `command`, including when the client panics.
async fn run_command(
    client: &dyn ServiceClient,
    command: DispatchCommand,
    sink: &dyn EventSink,
) {
    match command {
        DispatchCommand::Process {
            session_id,
            endpoint,
            request,
        } => {
            let outcome = match AssertUnwindSafe(client.process(&endpoint, &request))
                .catch_unwind()
                .await
            {
                Ok(exchange) => classify(&exchange),
                Err(_) => Outcome::Failure(ProcessingFailure::new(
                    FailureCategory::Unexpected,
                    "Erro inesperado: falha interna no cliente HTTP",
                )),
            };
            counter_debug!("session {} classified: {:?}", session_id, outcome);
            sink.emit(EngineEvent::DispatchCompleted {
                session_id,
                outcome,
            });
        }
        DispatchCommand::Health {
            session_id,
            endpoint,
        } => {
            let health = match AssertUnwindSafe(client.health(&endpoint))
                .catch_unwind()
                .await
            {
                Ok(exchange) => classify_health(&exchange),
                Err(_) => HealthOutcome::Unreachable {
                    category: FailureCategory::Unexpected,
                    message: "falha interna no cliente HTTP".to_string(),
                },
            };
            sink.emit(EngineEvent::HealthCompleted { session_id, health });
        }
        DispatchCommand::Shutdown => {}
    }
}
