//! Showcase engine: remote calls, timers, and resolve hooks.
mod engine;
mod hooks;
mod scheduler;
mod transport;
mod types;
mod wire;

pub use engine::EngineHandle;
pub use hooks::{ResolveCallback, ResolveHooks};
pub use scheduler::Scheduler;
pub use transport::{
    Endpoints, ReqwestTransport, Transport, TransportSettings, DEFAULT_BASE_URL,
};
pub use types::{ChannelEventSink, EngineError, EngineEvent, EventSink};
pub use wire::{error_detail, parse_success};
