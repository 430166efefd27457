use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked for an operation. `at` is the wall-clock submission time.
    SubmitRequested {
        submission: crate::Submission,
        at: DateTime<Utc>,
    },
    /// Transport finished a job.
    JobCompleted {
        job_id: crate::JobId,
        result: crate::JobOutcome,
    },
    /// User hid the cold-start notice; the job keeps running.
    DismissNotice { job_id: crate::JobId },
    /// A scheduled timer fired.
    TimerFired(crate::TimerId),
    /// User picked realtime, upload, or single capture.
    CaptureModeSelected(crate::CaptureMode),
    /// Frame source answered a capture request. `None` when no frame was available.
    FrameCaptured {
        frame: Option<crate::Blob>,
        at: DateTime<Utc>,
    },
    /// User discarded the captured image and its results.
    RecaptureClicked,
    /// User edited the gallery search box.
    ProjectFilterChanged(String),
}
