use std::sync::mpsc;

use chrono::Utc;
use showcase_core::{Effect, JobHandle, JobId, JobOutcome, Msg};
use showcase_engine::{EngineEvent, EngineHandle, EventSink, ResolveHooks};
use showcase_logging::{job_info, job_warn, showcase_debug};

use super::app::Inbound;
use super::capture::FrameSource;

/// Carries out the effects `update` asks for. Effects that are answered
/// synchronously come back as follow-up messages.
pub struct EffectRunner {
    engine: EngineHandle,
    hooks: ResolveHooks,
    frames: Box<dyn FrameSource>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, frames: Box<dyn FrameSource>) -> Self {
        Self {
            engine,
            hooks: ResolveHooks::new(),
            frames,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::Dispatch { handle, request } => {
                    self.hooks.register(handle.job_id, log_resolution);
                    self.engine.dispatch(handle, request);
                }
                Effect::JobResolved { handle, outcome } => {
                    let fired = self.hooks.fire(handle, &outcome);
                    showcase_debug!("job {} resolved, {} hook(s) ran", handle.job_id, fired);
                }
                Effect::StartTimer { timer, period } => self.engine.start_timer(timer, period),
                Effect::StopTimer { kind } => self.engine.stop_timer(kind),
                Effect::CaptureFrame => follow_ups.push(self.grab_frame()),
            }
        }
        follow_ups
    }

    /// Registers a callback for when the job resolves. Never runs for a job
    /// that does not resolve.
    pub fn on_resolve<F>(&mut self, job_id: JobId, callback: F)
    where
        F: FnOnce(JobHandle, &JobOutcome) + Send + 'static,
    {
        self.hooks.register(job_id, callback);
    }

    pub fn grab_frame(&mut self) -> Msg {
        Msg::FrameCaptured {
            frame: self.frames.grab(),
            at: Utc::now(),
        }
    }
}

fn log_resolution(handle: JobHandle, outcome: &JobOutcome) {
    match outcome {
        Ok(result) => job_info!(handle.job_id, "{} succeeded: {}", handle.operation, result.summary()),
        Err(err) => job_warn!(handle.job_id, "{} failed: {}", handle.operation, err),
    }
}

/// Feeds engine events into the main loop's inbox.
pub struct InboxSink {
    tx: mpsc::Sender<Inbound>,
}

impl InboxSink {
    pub fn new(tx: mpsc::Sender<Inbound>) -> Self {
        Self { tx }
    }
}

impl EventSink for InboxSink {
    fn emit(&self, event: EngineEvent) -> bool {
        self.tx.send(Inbound::Engine(event)).is_ok()
    }
}

pub fn engine_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::JobCompleted { job_id, outcome } => Msg::JobCompleted {
            job_id,
            result: outcome,
        },
        EngineEvent::TimerFired(timer) => Msg::TimerFired(timer),
    }
}
