use showcase_core::{
    update, AppState, CaptureMode, FailureKind, JobError, Msg, Slot, TimerId, TimerKind,
};

fn assert_untouched(state: AppState, msg: Msg) {
    let (mut next, effects) = update(state.clone(), msg);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(state, next);
}

#[test]
fn reselecting_current_mode_changes_nothing() {
    assert_untouched(AppState::new(), Msg::CaptureModeSelected(CaptureMode::Upload));
}

#[test]
fn completion_for_unknown_job_changes_nothing() {
    assert_untouched(
        AppState::new(),
        Msg::JobCompleted {
            job_id: 7,
            result: Err(JobError::new(FailureKind::Network, "Server error")),
        },
    );
}

#[test]
fn ticks_without_a_running_timer_change_nothing() {
    assert_untouched(
        AppState::new(),
        Msg::TimerFired(TimerId {
            kind: TimerKind::Elapsed(Slot::Answer),
            generation: 1,
        }),
    );
    assert_untouched(
        AppState::new(),
        Msg::TimerFired(TimerId {
            kind: TimerKind::LiveCountdown,
            generation: 1,
        }),
    );
}
