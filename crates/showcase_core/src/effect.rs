use std::time::Duration;

use crate::{JobHandle, JobOutcome, Request, TimerId, TimerKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the request to its remote service.
    Dispatch { handle: JobHandle, request: Request },
    /// A job reached a terminal state; run its resolve hooks.
    JobResolved {
        handle: JobHandle,
        outcome: JobOutcome,
    },
    /// Start a periodic timer, replacing any running timer of the same kind.
    StartTimer { timer: TimerId, period: Duration },
    StopTimer { kind: TimerKind },
    /// Grab a frame from the live source and answer with `Msg::FrameCaptured`.
    CaptureFrame,
}
