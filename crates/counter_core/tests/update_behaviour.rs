use std::sync::Once;

use counter_core::{
    update, AppState, Effect, FailureCategory, HealthOutcome, Msg, Outcome, ProcessingFailure,
    ProcessingStats, ServerEndpoint,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(counter_logging::initialize_for_tests);
}

fn submit(state: AppState, text: &str, label: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::SubmitText {
            text: text.to_string(),
            source_label: label.to_string(),
        },
    )
}

fn stats() -> Outcome {
    Outcome::Success(ProcessingStats {
        letters_count: 5,
        numbers_count: 3,
        total_characters: 10,
        processing_time_ms: 1.23,
    })
}

fn dispatched_session(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Dispatch { session_id, .. } | Effect::CheckHealth { session_id, .. } => {
                Some(*session_id)
            }
            _ => None,
        })
        .expect("dispatch effect")
}

#[test]
fn submit_emits_started_before_dispatch_and_disables_controls() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "hello 42", "Texto (8 caracteres)");

    assert_eq!(effects.len(), 2);
    assert_eq!(
        effects[0],
        Effect::NotifyStarted {
            session_id: 1,
            status: "Processando texto (8 caracteres)...".to_string(),
        }
    );
    match &effects[1] {
        Effect::Dispatch {
            session_id,
            endpoint,
            request,
        } => {
            assert_eq!(*session_id, 1);
            assert_eq!(endpoint, &ServerEndpoint::default());
            assert_eq!(request.text(), "hello 42");
        }
        other => panic!("unexpected effect {other:?}"),
    }

    let view = state.view();
    assert!(!view.controls_enabled);
    assert_eq!(view.in_flight, Some(1));
}

#[test]
fn completion_renders_report_and_re_enables_controls() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "hello", "src");
    let session_id = dispatched_session(&effects);

    let (state, effects) = update(
        state,
        Msg::DispatchCompleted {
            session_id,
            outcome: stats(),
        },
    );

    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::NotifyOutcome { report, status, .. } => {
            assert!(report.contains("Fonte: src"));
            assert!(report.contains("DISTRIBUIÇÃO"));
            assert_eq!(status, "Processamento concluído com sucesso!");
        }
        other => panic!("unexpected effect {other:?}"),
    }
    let view = state.view();
    assert!(view.controls_enabled);
    assert_eq!(view.in_flight, None);
    assert!(view.report.contains("ESTATÍSTICAS"));
}

#[test]
fn empty_text_is_rejected_without_dispatch() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "   \n", "src");

    assert_eq!(
        effects,
        vec![Effect::ShowRejection {
            message: "Texto não pode estar vazio!".to_string()
        }]
    );
    let view = state.view();
    assert!(view.controls_enabled);
    assert_eq!(view.status, "Erro: Texto não pode estar vazio!");
}

#[test]
fn submit_while_busy_is_ignored() {
    init_logging();
    let (state, _) = submit(AppState::new(), "first", "src");
    let before = state.view();

    let (state, effects) = submit(state, "second", "src");
    assert!(effects.is_empty());
    assert_eq!(state.view().in_flight, before.in_flight);

    let (_state, effects) = update(state, Msg::CheckHealth);
    assert!(effects.is_empty());
}

#[test]
fn stale_completion_is_dropped() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "first", "src");
    let first = dispatched_session(&effects);
    let (state, _) = update(
        state,
        Msg::DispatchCompleted {
            session_id: first,
            outcome: stats(),
        },
    );

    let (state, effects) = submit(state, "second", "src");
    let second = dispatched_session(&effects);
    assert!(second > first);

    // A duplicate answer for the finished session must not close the new one.
    let (state, effects) = update(
        state,
        Msg::DispatchCompleted {
            session_id: first,
            outcome: stats(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().in_flight, Some(second));

    let (state, effects) = update(
        state,
        Msg::DispatchCompleted {
            session_id: second,
            outcome: stats(),
        },
    );
    assert_eq!(effects.len(), 1);
    assert!(state.view().controls_enabled);
}

#[test]
fn health_result_cannot_close_processing_session() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "text", "src");
    let session_id = dispatched_session(&effects);

    let (state, effects) = update(
        state,
        Msg::HealthCompleted {
            session_id,
            health: HealthOutcome::Healthy {
                service_status: None,
            },
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().in_flight, Some(session_id));
}

#[test]
fn failure_outcome_sets_error_status() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "text", "src");
    let session_id = dispatched_session(&effects);
    let failure = ProcessingFailure::new(FailureCategory::HttpStatus, "HTTP 500: boom");

    let (state, effects) = update(
        state,
        Msg::DispatchCompleted {
            session_id,
            outcome: Outcome::Failure(failure),
        },
    );
    assert_eq!(effects.len(), 1);
    let view = state.view();
    assert_eq!(view.status, "Erro no processamento: HTTP 500: boom");
    assert!(view.report.contains("💥 ERRO: HTTP 500: boom"));
}

#[test]
fn reconfiguring_while_busy_keeps_captured_endpoint() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "text", "src");
    let captured = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Dispatch { endpoint, .. } => Some(endpoint.clone()),
            _ => None,
        })
        .unwrap();

    let (state, effects) = update(
        state,
        Msg::ConfigureEndpoint {
            host: "example.org".to_string(),
            port: 9090,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ShowNotice {
            report: "Servidor configurado para: http://example.org:9090".to_string(),
            status: "Servidor configurado: http://example.org:9090".to_string(),
        }]
    );
    assert_eq!(captured.base_url(), "http://localhost:8080");
    assert_eq!(state.view().endpoint_url, "http://example.org:9090");
    assert!(!state.view().controls_enabled);
}

#[test]
fn empty_host_is_rejected() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::ConfigureEndpoint {
            host: "  ".to_string(),
            port: 8080,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ShowRejection {
            message: "O campo servidor não pode estar vazio!".to_string()
        }]
    );
    assert_eq!(state.view().endpoint_url, "http://localhost:8080");
}

#[test]
fn health_check_is_a_session_reported_against_captured_url() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::CheckHealth);
    assert_eq!(
        effects[0],
        Effect::NotifyStarted {
            session_id: 1,
            status: "Verificando status do servidor...".to_string(),
        }
    );
    let session_id = dispatched_session(&effects);
    assert!(!state.view().controls_enabled);

    let (state, effects) = update(
        state,
        Msg::HealthCompleted {
            session_id,
            health: HealthOutcome::Unhealthy { status: 503 },
        },
    );
    assert_eq!(
        effects,
        vec![Effect::NotifyOutcome {
            session_id,
            report: "❌ Servidor respondeu com status 503.\nURL: http://localhost:8080".to_string(),
            status: "Servidor com problemas: http://localhost:8080".to_string(),
        }]
    );
    assert!(state.view().controls_enabled);
}

#[test]
fn teardown_cancels_and_suppresses_later_outcomes() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "text", "src");
    let session_id = dispatched_session(&effects);

    let (state, effects) = update(state, Msg::Teardown);
    assert_eq!(effects, vec![Effect::CancelInFlight]);
    assert!(state.is_torn_down());
    assert!(!state.view().controls_enabled);

    let (state, effects) = update(
        state,
        Msg::DispatchCompleted {
            session_id,
            outcome: stats(),
        },
    );
    assert!(effects.is_empty());

    let (_state, effects) = submit(state, "again", "src");
    assert!(effects.is_empty());
}

#[test]
fn initial_view_shows_welcome() {
    let view = AppState::new().view();
    assert!(view.controls_enabled);
    assert_eq!(view.status, "Pronto. Servidor: http://localhost:8080");
    assert!(view.report.starts_with("Cliente iniciado."));
}
