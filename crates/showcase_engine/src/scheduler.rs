use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use showcase_core::{TimerId, TimerKind};
use showcase_logging::showcase_debug;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::{EngineEvent, EventSink};

/// Periodic timers keyed by kind. Starting a kind replaces whatever ran
/// under it; stopping aborts the task, so no further ticks are produced.
#[derive(Default)]
pub struct Scheduler {
    tasks: HashMap<TimerKind, JoinHandle<()>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(
        &mut self,
        runtime: &Handle,
        timer: TimerId,
        period: Duration,
        sink: Arc<dyn EventSink>,
    ) {
        self.stop(timer.kind);
        showcase_debug!("timer {:?} started (period {:?})", timer, period);
        // Phase is fixed at start, not at first poll of the task.
        let first = Instant::now() + period;
        let task = runtime.spawn(async move {
            let mut ticks = interval_at(first, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if !sink.emit(EngineEvent::TimerFired(timer)) {
                    break;
                }
            }
        });
        self.tasks.insert(timer.kind, task);
    }

    pub fn stop(&mut self, kind: TimerKind) {
        if let Some(task) = self.tasks.remove(&kind) {
            task.abort();
            showcase_debug!("timer {:?} stopped", kind);
        }
    }

    pub fn is_running(&self, kind: TimerKind) -> bool {
        self.tasks
            .get(&kind)
            .is_some_and(|task| !task.is_finished())
    }

    pub fn stop_all(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop_all();
    }
}
