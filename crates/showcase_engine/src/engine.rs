use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use showcase_core::{JobHandle, Request, TimerId, TimerKind};
use showcase_logging::{job_info, showcase_info};

use crate::scheduler::Scheduler;
use crate::transport::Transport;
use crate::{EngineError, EngineEvent, EventSink};

enum EngineCommand {
    Dispatch { handle: JobHandle, request: Request },
    StartTimer { timer: TimerId, period: Duration },
    StopTimer { kind: TimerKind },
}

/// Owns the async runtime thread that performs calls and drives timers.
/// Dropping the handle shuts the thread down and abandons outstanding work.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(
        transport: Arc<dyn Transport>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("showcase-engine")
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut scheduler = Scheduler::new();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Dispatch { handle, request } => {
                        let transport = transport.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            let outcome = transport.call(handle.job_id, &request).await;
                            sink.emit(EngineEvent::JobCompleted {
                                job_id: handle.job_id,
                                outcome,
                            });
                        });
                    }
                    EngineCommand::StartTimer { timer, period } => {
                        scheduler.start(runtime.handle(), timer, period, sink.clone());
                    }
                    EngineCommand::StopTimer { kind } => scheduler.stop(kind),
                }
            }
            scheduler.stop_all();
            showcase_info!("engine command channel closed, shutting down");
            runtime.shutdown_background();
        });

        Ok(Self { cmd_tx })
    }

    pub fn dispatch(&self, handle: JobHandle, request: Request) {
        job_info!(handle.job_id, "dispatching {}", handle.operation);
        let _ = self.cmd_tx.send(EngineCommand::Dispatch { handle, request });
    }

    pub fn start_timer(&self, timer: TimerId, period: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::StartTimer { timer, period });
    }

    pub fn stop_timer(&self, kind: TimerKind) {
        let _ = self.cmd_tx.send(EngineCommand::StopTimer { kind });
    }
}
