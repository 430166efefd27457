use crate::{
    CaptureMode, JobError, JobId, JobStatus, OperationResult, Project, RequestJob, Slot,
    ValidationError,
};

pub const NOTICE_TITLE: &str = "Processing Request";

/// Fixed advisory shown while a cold-starting service spins up.
pub const NOTICE_ADVISORY: [&str; 3] = [
    "This may take 50 seconds to 5 minutes to respond: the services run on free hosting that sleeps when idle.",
    "The service shuts down after 15 minutes of inactivity to save resources.",
    "Subsequent requests are fast once the service is warmed up.",
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub mode: CaptureMode,
    pub countdown: Option<u32>,
    pub has_captured_image: bool,
    pub has_described_image: bool,
    pub slots: Vec<SlotView>,
    pub notice: Option<NoticeView>,
    pub projects: Vec<&'static Project>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn slot(&self, slot: Slot) -> Option<&SlotView> {
        self.slots.iter().find(|view| view.slot == slot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub slot: Slot,
    pub job_id: Option<JobId>,
    pub status: JobStatus,
    pub elapsed_seconds: u32,
    pub notice_dismissed: bool,
    pub result: Option<OperationResult>,
    pub error: Option<JobError>,
    pub validation_error: Option<ValidationError>,
    pub outstanding: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub job_id: JobId,
    pub project: &'static str,
    pub elapsed_seconds: u32,
    pub elapsed_label: String,
}

impl NoticeView {
    pub(crate) fn for_job(job: &RequestJob) -> Self {
        Self {
            job_id: job.id,
            project: job.operation.project_name(),
            elapsed_seconds: job.elapsed_seconds,
            elapsed_label: format_elapsed(job.elapsed_seconds),
        }
    }
}

/// Formats seconds as `m:ss`.
pub fn format_elapsed(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::format_elapsed;

    #[test]
    fn elapsed_pads_seconds() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(7), "0:07");
        assert_eq!(format_elapsed(75), "1:15");
        assert_eq!(format_elapsed(600), "10:00");
    }
}
