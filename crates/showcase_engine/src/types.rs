use std::io;

use showcase_core::{JobId, JobOutcome, TimerId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    JobCompleted { job_id: JobId, outcome: JobOutcome },
    TimerFired(TimerId),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
}

/// Receives engine events. Implementations forward them to whoever owns the state.
pub trait EventSink: Send + Sync {
    /// Returns false once the receiving side has gone away.
    fn emit(&self, event: EngineEvent) -> bool;
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}
