use std::collections::HashMap;

use showcase_core::{JobHandle, JobId, JobOutcome};

pub type ResolveCallback = Box<dyn FnOnce(JobHandle, &JobOutcome) + Send>;

/// Callbacks waiting for a job to resolve. Each one runs at most once;
/// callbacks for jobs that never resolve are simply never run.
#[derive(Default)]
pub struct ResolveHooks {
    callbacks: HashMap<JobId, Vec<ResolveCallback>>,
}

impl ResolveHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, job_id: JobId, callback: F)
    where
        F: FnOnce(JobHandle, &JobOutcome) + Send + 'static,
    {
        self.callbacks
            .entry(job_id)
            .or_default()
            .push(Box::new(callback));
    }

    /// Runs and removes every callback registered for the job. Returns how many ran.
    pub fn fire(&mut self, handle: JobHandle, outcome: &JobOutcome) -> usize {
        let callbacks = self.callbacks.remove(&handle.job_id).unwrap_or_default();
        let count = callbacks.len();
        for callback in callbacks {
            callback(handle, outcome);
        }
        count
    }
}
