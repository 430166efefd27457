use std::fmt;

use chrono::{DateTime, Utc};

use crate::{Operation, OperationResult, Request};

pub type JobId = u64;

/// Outcome delivered to resolve hooks and the `JobCompleted` message.
pub type JobOutcome = Result<OperationResult, JobError>;

/// Returned when a submission is accepted; names the job and what it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobHandle {
    pub job_id: JobId,
    pub operation: Operation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Lifecycle value of a job. Results and errors only exist in their terminal variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Pending,
    Succeeded(OperationResult),
    Failed(JobError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobError {
    pub kind: FailureKind,
    pub message: String,
}

impl JobError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// True for failures the service reported or the network caused, as
    /// opposed to a reply we could not understand.
    pub fn is_transport(&self) -> bool {
        !matches!(self.kind, FailureKind::UnknownResponse)
    }
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl std::error::Error for JobError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    HttpStatus(u16),
    Network,
    Timeout,
    TooLarge { max_bytes: u64 },
    UnknownResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes } => {
                write!(f, "response larger than {max_bytes} bytes")
            }
            FailureKind::UnknownResponse => write!(f, "unknown response"),
        }
    }
}

/// One submission of an operation, from `Pending` until it resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestJob {
    pub id: JobId,
    pub operation: Operation,
    pub submitted_at: DateTime<Utc>,
    pub elapsed_seconds: u32,
    pub notice_dismissed: bool,
    pub request: Request,
    state: JobState,
}

impl RequestJob {
    pub(crate) fn pending(id: JobId, request: Request, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            operation: request.operation(),
            submitted_at,
            elapsed_seconds: 0,
            notice_dismissed: false,
            request,
            state: JobState::Pending,
        }
    }

    pub fn handle(&self) -> JobHandle {
        JobHandle {
            job_id: self.id,
            operation: self.operation,
        }
    }

    pub fn state(&self) -> &JobState {
        &self.state
    }

    pub fn status(&self) -> JobStatus {
        match self.state {
            JobState::Idle => JobStatus::Idle,
            JobState::Pending => JobStatus::Pending,
            JobState::Succeeded(_) => JobStatus::Succeeded,
            JobState::Failed(_) => JobStatus::Failed,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, JobState::Pending)
    }

    pub fn result(&self) -> Option<&OperationResult> {
        match &self.state {
            JobState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&JobError> {
        match &self.state {
            JobState::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Moves a pending job to its terminal state. Returns false if the job
    /// already resolved; the lifecycle never goes backwards.
    pub(crate) fn resolve(&mut self, outcome: &JobOutcome) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.state = match outcome {
            Ok(result) => JobState::Succeeded(result.clone()),
            Err(error) => JobState::Failed(error.clone()),
        };
        true
    }
}
