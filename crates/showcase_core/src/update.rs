use chrono::{DateTime, Utc};

use crate::{
    AppState, Effect, Msg, Slot, Submission, TimerId, TimerKind, TICK_PERIOD,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SubmitRequested { submission, at } => submit(&mut state, submission, at),
        Msg::JobCompleted { job_id, result } => match state.resolve_job(job_id, &result) {
            Some((handle, stop_timer)) => {
                let mut effects = Vec::with_capacity(2);
                if stop_timer {
                    effects.push(Effect::StopTimer {
                        kind: TimerKind::Elapsed(handle.operation.slot()),
                    });
                }
                effects.push(Effect::JobResolved {
                    handle,
                    outcome: result,
                });
                effects
            }
            None => Vec::new(),
        },
        Msg::DismissNotice { job_id } => {
            state.dismiss(job_id);
            Vec::new()
        }
        Msg::TimerFired(TimerId { kind, generation }) => match kind {
            TimerKind::Elapsed(slot) => {
                state.tick_elapsed(slot, generation);
                Vec::new()
            }
            TimerKind::LiveCountdown => {
                if state.tick_countdown(generation) {
                    vec![Effect::CaptureFrame]
                } else {
                    Vec::new()
                }
            }
        },
        Msg::CaptureModeSelected(mode) => {
            let (left_live, entered) = state.switch_mode(mode);
            let mut effects = Vec::new();
            if left_live {
                effects.push(Effect::StopTimer {
                    kind: TimerKind::LiveCountdown,
                });
            }
            if let Some(generation) = entered {
                effects.push(Effect::StartTimer {
                    timer: TimerId {
                        kind: TimerKind::LiveCountdown,
                        generation,
                    },
                    period: TICK_PERIOD,
                });
            }
            effects
        }
        Msg::FrameCaptured { frame, at } => match frame {
            Some(frame) => {
                state.set_captured_image(Some(frame.clone()));
                submit(
                    &mut state,
                    Submission::DescribeImage { image: Some(frame) },
                    at,
                )
            }
            None => Vec::new(),
        },
        Msg::RecaptureClicked => {
            state.set_captured_image(None);
            for slot in [Slot::Description, Slot::DetailedDescription, Slot::Answer] {
                state.clear_slot(slot);
            }
            Vec::new()
        }
        Msg::ProjectFilterChanged(filter) => {
            state.set_project_filter(filter);
            Vec::new()
        }
    };

    (state, effects)
}

fn submit(state: &mut AppState, submission: Submission, at: DateTime<Utc>) -> Vec<Effect> {
    let slot = submission.operation().slot();
    let request = match submission.validate(state.last_described_image()) {
        Ok(request) => request,
        Err(error) => {
            state.reject(slot, error);
            return Vec::new();
        }
    };

    let job = state.start_job(request, at);
    vec![
        Effect::StartTimer {
            timer: TimerId {
                kind: TimerKind::Elapsed(slot),
                generation: job.id,
            },
            period: TICK_PERIOD,
        },
        Effect::Dispatch {
            handle: job.handle(),
            request: job.request,
        },
    ]
}
