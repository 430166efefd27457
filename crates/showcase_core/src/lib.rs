//! Showcase core: pure request-lifecycle state machine and view-model helpers.
mod catalog;
mod effect;
mod job;
mod msg;
mod operation;
mod request;
mod schema;
mod state;
mod timer;
mod update;
mod view_model;

pub use catalog::{filter_projects, Project, PROJECTS};
pub use effect::Effect;
pub use job::{FailureKind, JobError, JobHandle, JobId, JobOutcome, JobState, JobStatus, RequestJob};
pub use msg::Msg;
pub use operation::{Operation, Slot};
pub use request::{Blob, Request, Submission, ValidationError, MAX_SONGS, MIN_SONGS};
pub use schema::{
    OperationResult, Recommendation, ReleaseYear, SearchResult, SearchSource, VideoResult,
};
pub use state::{AppState, CaptureMode, ResolutionPolicy, SlotState};
pub use timer::{TimerId, TimerKind, LIVE_COUNTDOWN_START, TICK_PERIOD};
pub use update::update;
pub use view_model::{format_elapsed, AppViewModel, NoticeView, SlotView, NOTICE_ADVISORY, NOTICE_TITLE};
