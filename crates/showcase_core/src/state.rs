use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::view_model::{AppViewModel, NoticeView, SlotView};
use crate::{
    filter_projects, Blob, JobHandle, JobId, JobOutcome, JobStatus, Request, RequestJob, Slot,
    ValidationError, LIVE_COUNTDOWN_START,
};

/// How a slot treats a resolution that arrives after a newer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionPolicy {
    /// Whatever resolves last is what the slot shows.
    #[default]
    LastResolutionWins,
    /// Only the most recent submission may become visible.
    LatestSubmissionWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    /// Live camera with a periodic auto-capture.
    Realtime,
    #[default]
    Upload,
    Capture,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LiveCountdown {
    pub(crate) remaining: u32,
    pub(crate) generation: u64,
    pub(crate) active: bool,
}

impl Default for LiveCountdown {
    fn default() -> Self {
        Self {
            remaining: LIVE_COUNTDOWN_START,
            generation: 0,
            active: false,
        }
    }
}

/// Jobs of one slot. Superseded jobs stay here until they resolve.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlotState {
    jobs: BTreeMap<JobId, RequestJob>,
    visible: Option<JobId>,
    /// Generation of the running elapsed timer, while any job here is pending.
    timer_generation: Option<u64>,
    validation_error: Option<ValidationError>,
}

impl SlotState {
    pub fn visible_job(&self) -> Option<&RequestJob> {
        self.visible.and_then(|id| self.jobs.get(&id))
    }

    pub fn job(&self, job_id: JobId) -> Option<&RequestJob> {
        self.jobs.get(&job_id)
    }

    /// Jobs still waiting on the network, visible or not.
    pub fn outstanding(&self) -> usize {
        self.jobs.values().filter(|job| job.is_pending()).count()
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation_error.as_ref()
    }

    fn prune_resolved(&mut self) {
        let visible = self.visible;
        self.jobs
            .retain(|id, job| job.is_pending() || Some(*id) == visible);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    policy: ResolutionPolicy,
    next_job_id: JobId,
    slots: BTreeMap<Slot, SlotState>,
    last_described_image: Option<Blob>,
    captured_image: Option<Blob>,
    mode: CaptureMode,
    countdown: LiveCountdown,
    project_filter: String,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_policy(ResolutionPolicy::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ResolutionPolicy) -> Self {
        Self {
            policy,
            next_job_id: 1,
            slots: Slot::ALL
                .iter()
                .map(|slot| (*slot, SlotState::default()))
                .collect(),
            last_described_image: None,
            captured_image: None,
            mode: CaptureMode::default(),
            countdown: LiveCountdown::default(),
            project_filter: String::new(),
            dirty: false,
        }
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// Current countdown value while live mode is on.
    pub fn countdown(&self) -> Option<u32> {
        self.countdown.active.then_some(self.countdown.remaining)
    }

    pub fn slot(&self, slot: Slot) -> &SlotState {
        // Every slot is inserted at construction.
        &self.slots[&slot]
    }

    pub fn visible_job(&self, slot: Slot) -> Option<&RequestJob> {
        self.slot(slot).visible_job()
    }

    pub fn job(&self, job_id: JobId) -> Option<&RequestJob> {
        self.slots.values().find_map(|slot| slot.job(job_id))
    }

    pub fn last_described_image(&self) -> Option<&Blob> {
        self.last_described_image.as_ref()
    }

    pub fn captured_image(&self) -> Option<&Blob> {
        self.captured_image.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        let slots = self
            .slots
            .iter()
            .map(|(slot, state)| SlotView::new(*slot, state))
            .collect();
        let notice = self
            .slots
            .values()
            .filter_map(SlotState::visible_job)
            .find(|job| job.is_pending() && !job.notice_dismissed && job.operation.shows_notice())
            .map(NoticeView::for_job);

        AppViewModel {
            mode: self.mode,
            countdown: self.countdown(),
            has_captured_image: self.captured_image.is_some(),
            has_described_image: self.last_described_image.is_some(),
            slots,
            notice,
            projects: filter_projects(&self.project_filter),
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut SlotState {
        self.slots.entry(slot).or_default()
    }

    pub(crate) fn reject(&mut self, slot: Slot, error: ValidationError) {
        self.slot_mut(slot).validation_error = Some(error);
        self.mark_dirty();
    }

    /// Registers a new pending job as the slot's visible job. The slot's
    /// elapsed timer is restarted under the new job's id as generation.
    pub(crate) fn start_job(&mut self, request: Request, at: DateTime<Utc>) -> RequestJob {
        let id = self.next_job_id;
        self.next_job_id += 1;

        if let Request::DescribeImage { image } = &request {
            self.last_described_image = Some(image.clone());
            self.clear_slot(Slot::DetailedDescription);
            self.clear_slot(Slot::Answer);
        }

        let job = RequestJob::pending(id, request, at);
        let slot = self.slot_mut(job.operation.slot());
        slot.validation_error = None;
        slot.jobs.insert(id, job.clone());
        slot.visible = Some(id);
        slot.timer_generation = Some(id);
        slot.prune_resolved();
        self.mark_dirty();
        job
    }

    /// Resolves a pending job. Returns its handle and whether the slot's
    /// elapsed timer should stop because nothing there is pending any more,
    /// or `None` if nothing was pending under that id.
    pub(crate) fn resolve_job(
        &mut self,
        job_id: JobId,
        outcome: &JobOutcome,
    ) -> Option<(JobHandle, bool)> {
        let policy = self.policy;
        let (_, state) = self
            .slots
            .iter_mut()
            .find(|(_, state)| state.jobs.get(&job_id).is_some_and(RequestJob::is_pending))?;

        let job = state.jobs.get_mut(&job_id)?;
        if !job.resolve(outcome) {
            return None;
        }
        let handle = job.handle();

        match policy {
            ResolutionPolicy::LastResolutionWins => state.visible = Some(job_id),
            ResolutionPolicy::LatestSubmissionWins => {
                if state.visible != Some(job_id) {
                    state.jobs.remove(&job_id);
                }
            }
        }
        state.prune_resolved();
        let stop_timer = state.outstanding() == 0 && state.timer_generation.take().is_some();
        self.mark_dirty();
        Some((handle, stop_timer))
    }

    /// Advances every pending job in the slot by one second. Ticks from a
    /// timer that has since been replaced or stopped are ignored.
    pub(crate) fn tick_elapsed(&mut self, slot: Slot, generation: u64) -> bool {
        let state = self.slot_mut(slot);
        if state.timer_generation != Some(generation) {
            return false;
        }
        let mut advanced = false;
        for job in state.jobs.values_mut().filter(|job| job.is_pending()) {
            job.elapsed_seconds += 1;
            advanced = true;
        }
        if advanced {
            self.mark_dirty();
        }
        advanced
    }

    pub(crate) fn dismiss(&mut self, job_id: JobId) {
        let job = self
            .slots
            .values_mut()
            .find_map(|slot| slot.jobs.get_mut(&job_id));
        if let Some(job) = job {
            if !job.notice_dismissed {
                job.notice_dismissed = true;
                self.mark_dirty();
            }
        }
    }

    /// Hides the slot's result. A pending visible job stays in place, the
    /// same way clearing text never cleared a spinner.
    pub(crate) fn clear_slot(&mut self, slot: Slot) {
        let state = self.slot_mut(slot);
        state.validation_error = None;
        if state.visible_job().is_some_and(|job| !job.is_pending()) {
            state.visible = None;
            state.prune_resolved();
        }
        self.mark_dirty();
    }

    pub(crate) fn set_captured_image(&mut self, image: Option<Blob>) {
        self.captured_image = image;
        self.mark_dirty();
    }

    pub(crate) fn set_project_filter(&mut self, filter: String) {
        self.project_filter = filter;
        self.mark_dirty();
    }

    /// Switches capture mode. Returns `(left_live, entered_live_generation)`.
    pub(crate) fn switch_mode(&mut self, mode: CaptureMode) -> (bool, Option<u64>) {
        if mode == self.mode {
            return (false, None);
        }
        let left_live = self.mode == CaptureMode::Realtime;
        self.mode = mode;
        self.countdown.remaining = LIVE_COUNTDOWN_START;
        self.countdown.active = false;

        let entered = if mode == CaptureMode::Realtime {
            self.countdown.generation += 1;
            self.countdown.active = true;
            Some(self.countdown.generation)
        } else {
            None
        };
        self.mark_dirty();
        (left_live, entered)
    }

    /// Advances the live countdown. Returns true when it wrapped and a
    /// capture is due.
    pub(crate) fn tick_countdown(&mut self, generation: u64) -> bool {
        if !self.countdown.active || self.countdown.generation != generation {
            return false;
        }
        self.mark_dirty();
        if self.countdown.remaining <= 1 {
            self.countdown.remaining = LIVE_COUNTDOWN_START;
            true
        } else {
            self.countdown.remaining -= 1;
            false
        }
    }
}

impl SlotView {
    fn new(slot: Slot, state: &SlotState) -> Self {
        let job = state.visible_job();
        Self {
            slot,
            job_id: job.map(|job| job.id),
            status: job.map_or(JobStatus::Idle, RequestJob::status),
            elapsed_seconds: job.map_or(0, |job| job.elapsed_seconds),
            notice_dismissed: job.is_some_and(|job| job.notice_dismissed),
            result: job.and_then(RequestJob::result).cloned(),
            error: job.and_then(RequestJob::error).cloned(),
            validation_error: state.validation_error.clone(),
            outstanding: state.outstanding(),
        }
    }
}
