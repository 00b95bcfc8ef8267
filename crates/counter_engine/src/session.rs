use std::time::{Duration, Instant};

use counter_core::{update, AppState, AppViewModel, Effect, Msg, ServerEndpoint, UiCoordinator};
use counter_logging::counter_debug;

use crate::{ClientSettings, Dispatcher, EngineError, EngineEvent};

/// Connects the operator-facing [`UiCoordinator`] to the [`Dispatcher`].
///
/// All calls happen on the caller's thread; the network work runs on the
/// dispatcher worker. Completions are picked up by [`ClientSession::pump`] or
/// [`ClientSession::wait_idle`].
pub struct ClientSession<C: UiCoordinator> {
    state: AppState,
    dispatcher: Dispatcher,
    coordinator: C,
}

impl<C: UiCoordinator> ClientSession<C> {
    pub fn new(settings: ClientSettings, coordinator: C) -> Result<Self, EngineError> {
        Ok(Self::with_dispatcher(
            Dispatcher::new(settings)?,
            ServerEndpoint::default(),
            coordinator,
        ))
    }

    pub fn with_dispatcher(dispatcher: Dispatcher, endpoint: ServerEndpoint, coordinator: C) -> Self {
        Self {
            state: AppState::with_endpoint(endpoint),
            dispatcher,
            coordinator,
        }
    }

    pub fn submit(&mut self, text: impl Into<String>, source_label: impl Into<String>) {
        self.dispatch_msg(Msg::SubmitText {
            text: text.into(),
            source_label: source_label.into(),
        });
    }

    pub fn configure_endpoint(&mut self, host: impl Into<String>, port: u16) {
        self.dispatch_msg(Msg::ConfigureEndpoint {
            host: host.into(),
            port,
        });
    }

    pub fn check_health(&mut self) {
        self.dispatch_msg(Msg::CheckHealth);
    }

    /// Delivers every completion that is already available. Never blocks.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.dispatcher.try_recv() {
            self.handle_event(event);
            delivered += 1;
        }
        delivered
    }

    /// Blocks until no session is in flight or `timeout` elapses. Returns
    /// whether the session went idle.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        self.pump();
        while self.state.is_busy() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            if let Some(event) = self.dispatcher.recv_timeout(remaining) {
                self.handle_event(event);
            }
        }
        true
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn endpoint(&self) -> &ServerEndpoint {
        self.state.endpoint()
    }

    pub fn coordinator(&self) -> &C {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut C {
        &mut self.coordinator
    }

    /// Cancels any in-flight session and waits for the worker to stop. No
    /// outcome is delivered for a cancelled session.
    pub fn shutdown(mut self) -> C {
        self.dispatch_msg(Msg::Teardown);
        let Self { coordinator, .. } = self;
        coordinator
    }

    fn handle_event(&mut self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::DispatchCompleted {
                session_id,
                outcome,
            } => Msg::DispatchCompleted {
                session_id,
                outcome,
            },
            EngineEvent::HealthCompleted { session_id, health } => {
                Msg::HealthCompleted { session_id, health }
            }
        };
        self.dispatch_msg(msg);
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.run_effects(effects);
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::NotifyStarted { status, .. } => {
                    self.coordinator.on_dispatch_started(&status);
                }
                Effect::Dispatch {
                    session_id,
                    endpoint,
                    request,
                } => self.dispatcher.dispatch(session_id, endpoint, request),
                Effect::CheckHealth {
                    session_id,
                    endpoint,
                } => self.dispatcher.check_health(session_id, endpoint),
                Effect::NotifyOutcome { report, status, .. } => {
                    self.coordinator.on_outcome(&report, &status);
                }
                Effect::ShowRejection { message } => self.coordinator.on_rejected(&message),
                Effect::ShowNotice { report, status } => {
                    self.coordinator.on_notice(&report, &status);
                }
                Effect::CancelInFlight => {
                    counter_debug!("cancelling in-flight dispatches");
                    self.dispatcher.shutdown();
                }
            }
        }
    }
}
