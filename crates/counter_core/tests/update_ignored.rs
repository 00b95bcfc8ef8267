use counter_core::{
    update, AppState, FailureCategory, HealthOutcome, Msg, Outcome, ProcessingFailure,
};

fn late_outcome(session_id: u64) -> Msg {
    Msg::DispatchCompleted {
        session_id,
        outcome: Outcome::Failure(ProcessingFailure::new(FailureCategory::Timeout, "late")),
    }
}

#[test]
fn completion_without_session_leaves_state_untouched() {
    let state = AppState::new();

    let (next, effects) = update(state.clone(), late_outcome(7));
    assert_eq!(state, next);
    assert!(effects.is_empty());

    let (next, effects) = update(
        state.clone(),
        Msg::HealthCompleted {
            session_id: 7,
            health: HealthOutcome::Unhealthy { status: 503 },
        },
    );
    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn every_message_after_teardown_leaves_state_untouched() {
    let (state, _) = update(AppState::new(), Msg::Teardown);

    for msg in [
        Msg::SubmitText {
            text: "abc".to_string(),
            source_label: "src".to_string(),
        },
        Msg::ConfigureEndpoint {
            host: "example.com".to_string(),
            port: 9000,
        },
        Msg::CheckHealth,
        late_outcome(1),
        Msg::Teardown,
    ] {
        let (next, effects) = update(state.clone(), msg);
        assert_eq!(state, next);
        assert!(effects.is_empty());
    }
}
