use counter_logging::{counter_debug, counter_info, counter_warn};

use crate::state::SessionKind;
use crate::{report, request, AppState, Effect, Msg, ServerEndpoint};

/// Pure update function: applies a message to state and returns any effects.
///
/// At most one session is in flight. Completions are fenced by session id, so a
/// late answer for a session that is no longer current is dropped.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.is_torn_down() {
        counter_debug!("ignoring {} after teardown", msg_name(&msg));
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::SubmitText { text, source_label } => {
            if state.is_busy() {
                counter_warn!("submit ignored: a session is already in flight");
                return (state, Vec::new());
            }
            match request::build(text, source_label) {
                Ok(request) => {
                    let session_id =
                        state.begin_session(SessionKind::Processing, request.source_label());
                    let status = report::render_dispatch_started(request.source_label());
                    state.set_display(None, status.clone());
                    counter_info!(
                        "session {} dispatch to {} text_len={}",
                        session_id,
                        state.endpoint(),
                        request.text().len()
                    );
                    vec![
                        Effect::NotifyStarted { session_id, status },
                        Effect::Dispatch {
                            session_id,
                            endpoint: state.endpoint().clone(),
                            request,
                        },
                    ]
                }
                Err(rejected) => {
                    counter_info!("input rejected: {}", rejected);
                    reject(&mut state, rejected.to_string())
                }
            }
        }
        Msg::ConfigureEndpoint { host, port } => match ServerEndpoint::new(&host, port) {
            Ok(endpoint) => {
                let base_url = endpoint.base_url();
                counter_info!("endpoint configured: {}", base_url);
                state.set_endpoint(endpoint);
                let (report, status) = report::render_endpoint_configured(&base_url);
                state.set_display(Some(report.clone()), status.clone());
                vec![Effect::ShowNotice { report, status }]
            }
            Err(err) => {
                counter_info!("endpoint rejected: {}", err);
                reject(&mut state, err.to_string())
            }
        },
        Msg::CheckHealth => {
            if state.is_busy() {
                counter_warn!("health check ignored: a session is already in flight");
                return (state, Vec::new());
            }
            let session_id = state.begin_session(SessionKind::HealthCheck, "");
            let status = report::HEALTH_CHECK_STARTED.to_string();
            state.set_display(None, status.clone());
            counter_info!("session {} health check on {}", session_id, state.endpoint());
            vec![
                Effect::NotifyStarted { session_id, status },
                Effect::CheckHealth {
                    session_id,
                    endpoint: state.endpoint().clone(),
                },
            ]
        }
        Msg::DispatchCompleted {
            session_id,
            outcome,
        } => match state.finish_session(session_id, SessionKind::Processing) {
            Some(session) => {
                let report = report::render(&outcome, &session.source_label);
                let status = report::render_status(&outcome);
                counter_info!(
                    "session {} completed success={}",
                    session_id,
                    outcome.is_success()
                );
                state.set_display(Some(report.clone()), status.clone());
                vec![Effect::NotifyOutcome {
                    session_id,
                    report,
                    status,
                }]
            }
            None => {
                counter_warn!("dropping stale outcome for session {}", session_id);
                Vec::new()
            }
        },
        Msg::HealthCompleted { session_id, health } => {
            match state.finish_session(session_id, SessionKind::HealthCheck) {
                Some(session) => {
                    let report = report::render_health(&health, &session.base_url);
                    let status = report::render_health_status(&health, &session.base_url);
                    counter_info!(
                        "session {} health healthy={}",
                        session_id,
                        health.is_healthy()
                    );
                    state.set_display(Some(report.clone()), status.clone());
                    vec![Effect::NotifyOutcome {
                        session_id,
                        report,
                        status,
                    }]
                }
                None => {
                    counter_warn!("dropping stale health result for session {}", session_id);
                    Vec::new()
                }
            }
        }
        Msg::Teardown => {
            if let Some(session) = state.tear_down() {
                counter_info!("teardown cancels session {}", session.session_id);
            }
            vec![Effect::CancelInFlight]
        }
    };

    (state, effects)
}

fn reject(state: &mut AppState, message: String) -> Vec<Effect> {
    state.set_display(None, report::render_rejection_status(&message));
    vec![Effect::ShowRejection { message }]
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::SubmitText { .. } => "SubmitText",
        Msg::ConfigureEndpoint { .. } => "ConfigureEndpoint",
        Msg::CheckHealth => "CheckHealth",
        Msg::DispatchCompleted { .. } => "DispatchCompleted",
        Msg::HealthCompleted { .. } => "HealthCompleted",
        Msg::Teardown => "Teardown",
    }
}
