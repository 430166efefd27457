use std::time::Duration;

use crate::Slot;

/// Value the live countdown starts from and resets to.
pub const LIVE_COUNTDOWN_START: u32 = 15;

/// Period of both the elapsed-time ticker and the live countdown.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Which scheduled task a timer drives. At most one timer per kind runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Elapsed(Slot),
    LiveCountdown,
}

/// A timer firing is tagged with the generation it was started with so that
/// a tick queued before a stop can be recognised and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId {
    pub kind: TimerKind,
    pub generation: u64,
}
