//! Turns view models into terminal lines.
//!
//! `render_changes` prints only what differs between two consecutive views,
//! so a ticking elapsed counter does not redraw every slot each second.

use showcase_core::{
    AppViewModel, CaptureMode, JobStatus, NoticeView, OperationResult, Project, SearchResult,
    SearchSource, Slot, SlotView, NOTICE_ADVISORY, NOTICE_TITLE,
};

/// Seconds between "still processing" reminders while a notice is up.
const REMINDER_EVERY: u32 = 10;
/// The live countdown is announced once it gets this low.
const COUNTDOWN_ANNOUNCE: u32 = 3;

pub fn render_changes(previous: &AppViewModel, next: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if previous.mode != next.mode {
        lines.push(mode_line(next));
    }
    if let Some(remaining) = next.countdown {
        if previous.countdown != next.countdown && remaining <= COUNTDOWN_ANNOUNCE {
            lines.push(format!("live capture in {remaining}s"));
        }
    }
    for slot in &next.slots {
        let changed = previous
            .slot(slot.slot)
            .map_or(true, |before| slot_changed(before, slot));
        if changed {
            lines.extend(render_slot(slot));
        }
    }

    if let Some(notice) = &next.notice {
        match &previous.notice {
            Some(shown) if shown.job_id == notice.job_id => {
                if shown.elapsed_seconds != notice.elapsed_seconds
                    && notice.elapsed_seconds % REMINDER_EVERY == 0
                {
                    lines.push(format!(
                        "  ... {} still processing ({})",
                        notice.project, notice.elapsed_label
                    ));
                }
            }
            _ => lines.extend(render_notice(notice)),
        }
    }

    lines
}

/// Everything currently visible, for the `status` command.
pub fn render_full(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![mode_line(view)];
    if view.has_captured_image {
        lines.push("captured image held; `recapture` to discard it".to_string());
    }
    if !view.has_described_image {
        lines.push("no image described yet".to_string());
    }
    for slot in &view.slots {
        if slot.status != JobStatus::Idle || slot.validation_error.is_some() {
            lines.extend(render_slot(slot));
        }
    }
    if let Some(notice) = &view.notice {
        lines.extend(render_notice(notice));
    }
    lines
}

pub fn render_projects(projects: &[&Project]) -> Vec<String> {
    if projects.is_empty() {
        return vec!["No projects match your search.".to_string()];
    }
    let mut lines = Vec::new();
    for project in projects {
        lines.push(format!("* {} [{}]", project.title, project.tags.join(", ")));
        lines.push(format!("  {}", project.description));
        for feature in project.features {
            lines.push(format!("    - {feature}"));
        }
    }
    lines
}

fn mode_line(view: &AppViewModel) -> String {
    match (view.mode, view.countdown) {
        (CaptureMode::Realtime, Some(remaining)) => {
            format!("mode: realtime (next capture in {remaining}s)")
        }
        (CaptureMode::Realtime, None) => "mode: realtime".to_string(),
        (CaptureMode::Upload, _) => "mode: upload".to_string(),
        (CaptureMode::Capture, _) => "mode: capture".to_string(),
    }
}

fn slot_changed(before: &SlotView, after: &SlotView) -> bool {
    before.job_id != after.job_id
        || before.status != after.status
        || before.validation_error != after.validation_error
}

fn slot_label(slot: Slot) -> &'static str {
    match slot {
        Slot::Description => "description",
        Slot::DetailedDescription => "details",
        Slot::Answer => "answer",
        Slot::Extraction => "extraction",
        Slot::Recommendations => "recommendations",
        Slot::Search => "search",
    }
}

pub fn render_slot(view: &SlotView) -> Vec<String> {
    let label = slot_label(view.slot);
    if let Some(error) = &view.validation_error {
        return vec![format!("[{label}] ! {error}")];
    }
    let Some(job_id) = view.job_id else {
        return vec![format!("[{label}] cleared")];
    };

    match view.status {
        JobStatus::Idle => vec![format!("[{label}] job {job_id} idle")],
        JobStatus::Pending => {
            let mut line = format!("[{label}] job {job_id} pending");
            if view.outstanding > 1 {
                line.push_str(&format!(" ({} in flight)", view.outstanding));
            }
            vec![line]
        }
        JobStatus::Succeeded => {
            let mut lines = vec![format!("[{label}] job {job_id} done")];
            if let Some(result) = &view.result {
                lines.extend(render_result(result));
            }
            lines
        }
        JobStatus::Failed => {
            let message = view
                .error
                .as_ref()
                .map_or("unknown error", |error| error.message.as_str());
            vec![format!("[{label}] job {job_id} failed: {message}")]
        }
    }
}

pub fn render_result(result: &OperationResult) -> Vec<String> {
    match result {
        OperationResult::Description(text)
        | OperationResult::DetailedDescription(text)
        | OperationResult::Answer(text)
        | OperationResult::FormattedText(text) => indent(text),
        OperationResult::Recommendations(songs) => {
            if songs.is_empty() {
                return vec!["  No recommendations received.".to_string()];
            }
            songs
                .iter()
                .enumerate()
                .map(|(index, song)| {
                    format!(
                        "  {}. {} by {} ({})",
                        index + 1,
                        song.song,
                        song.singer,
                        song.year
                    )
                })
                .collect()
        }
        OperationResult::Search(search) => render_search(search),
    }
}

fn render_search(search: &SearchResult) -> Vec<String> {
    if search.source == SearchSource::Gemini {
        return search.answer.as_deref().map(indent).unwrap_or_default();
    }

    let videos = search.results.as_deref().unwrap_or_default();
    let heading = match search.source {
        SearchSource::GoogleVideos => "Google Videos",
        _ => "YouTube Results",
    };
    let mut lines = vec![format!(
        "  {heading}: found {} relevant videos",
        videos.len()
    )];
    for (index, video) in videos.iter().enumerate() {
        lines.push(format!("  {}. {}", index + 1, video.title));
        lines.push(format!("     {}", video.link));
        let meta: Vec<&str> = [video.channel.as_deref(), video.views.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !meta.is_empty() {
            lines.push(format!("     {}", meta.join(" | ")));
        }
        if let Some(description) = &video.description {
            lines.push(format!("     {description}"));
        }
    }
    lines
}

fn render_notice(notice: &NoticeView) -> Vec<String> {
    let mut lines = vec![
        format!(
            "== {NOTICE_TITLE}: {} (job {}, {}) ==",
            notice.project, notice.job_id, notice.elapsed_label
        ),
    ];
    lines.extend(NOTICE_ADVISORY.iter().map(|text| format!("  {text}")));
    lines.push(format!(
        "  `dismiss {}` to keep working while it runs in the background",
        notice.job_id
    ));
    lines
}

fn indent(text: &str) -> Vec<String> {
    text.lines().map(|line| format!("  {line}")).collect()
}

#[cfg(test)]
mod tests {
    use showcase_core::{
        filter_projects, AppState, Blob, FailureKind, JobError, Msg, Recommendation,
        ReleaseYear, Submission, VideoResult,
    };

    use super::*;

    fn at() -> chrono::DateTime<chrono::Utc> {
        chrono::Utc::now()
    }

    fn step(state: AppState, msg: Msg) -> AppState {
        showcase_core::update(state, msg).0
    }

    #[test]
    fn pending_submission_shows_slot_and_notice() {
        let before = AppState::new();
        let after = step(
            before.clone(),
            Msg::SubmitRequested {
                submission: Submission::Search {
                    query: "rust async".into(),
                },
                at: at(),
            },
        );

        let lines = render_changes(&before.view(), &after.view());
        assert_eq!(lines[0], "[search] job 1 pending");
        assert!(lines[1].starts_with("== Processing Request: Web Scraping Assistant (job 1, 0:00)"));
        assert_eq!(lines.last().unwrap(), "  `dismiss 1` to keep working while it runs in the background");
    }

    #[test]
    fn unchanged_views_render_nothing() {
        let view = AppState::new().view();
        assert!(render_changes(&view, &view).is_empty());
    }

    #[test]
    fn validation_errors_render_inline() {
        let before = AppState::new();
        let after = step(
            before.clone(),
            Msg::SubmitRequested {
                submission: Submission::AnswerImageQuestion {
                    question: "what is this?".into(),
                },
                at: at(),
            },
        );
        assert_eq!(
            render_changes(&before.view(), &after.view()),
            vec!["[answer] ! No image available. Please capture or upload one first."]
        );
    }

    #[test]
    fn failed_job_shows_message() {
        let pending = step(
            AppState::new(),
            Msg::SubmitRequested {
                submission: Submission::ExtractFileText {
                    file: Some(Blob::new("notes.txt", b"hello".to_vec())),
                },
                at: at(),
            },
        );
        let failed = step(
            pending.clone(),
            Msg::JobCompleted {
                job_id: 1,
                result: Err(JobError::new(FailureKind::HttpStatus(400), "bad file")),
            },
        );
        let lines = render_changes(&pending.view(), &failed.view());
        assert_eq!(lines, vec!["[extraction] job 1 failed: bad file"]);
    }

    #[test]
    fn recommendations_list_each_song() {
        let result = OperationResult::Recommendations(vec![
            Recommendation {
                song: "Imagine".into(),
                singer: "John Lennon".into(),
                year: ReleaseYear::Number(1971),
            },
            Recommendation {
                song: "Hey Jude".into(),
                singer: "The Beatles".into(),
                year: ReleaseYear::Text("1968".into()),
            },
        ]);
        assert_eq!(
            render_result(&result),
            vec![
                "  1. Imagine by John Lennon (1971)",
                "  2. Hey Jude by The Beatles (1968)"
            ]
        );
    }

    #[test]
    fn video_results_list_metadata() {
        let result = OperationResult::Search(SearchResult {
            source: SearchSource::Youtube,
            answer: None,
            results: Some(vec![VideoResult {
                title: "Rust in 100 seconds".into(),
                link: "https://youtu.be/x".into(),
                channel: Some("Fireship".into()),
                views: Some("2M views".into()),
                description: None,
            }]),
        });
        assert_eq!(
            render_result(&result),
            vec![
                "  YouTube Results: found 1 relevant videos",
                "  1. Rust in 100 seconds",
                "     https://youtu.be/x",
                "     Fireship | 2M views",
            ]
        );
    }

    #[test]
    fn gemini_answer_is_indented_text() {
        let result = OperationResult::Search(SearchResult {
            source: SearchSource::Gemini,
            answer: Some("line one\nline two".into()),
            results: None,
        });
        assert_eq!(render_result(&result), vec!["  line one", "  line two"]);
    }

    #[test]
    fn empty_project_filter_result_says_so() {
        assert_eq!(
            render_projects(&filter_projects("zzzz-no-match")),
            vec!["No projects match your search."]
        );
        let lines = render_projects(&filter_projects("vision"));
        assert!(lines[0].starts_with("* AI Vision Studio"));
    }

    #[test]
    fn entering_live_mode_announces_countdown() {
        let before = AppState::new();
        let after = step(before.clone(), Msg::CaptureModeSelected(CaptureMode::Realtime));
        assert_eq!(
            render_changes(&before.view(), &after.view()),
            vec!["mode: realtime (next capture in 15s)"]
        );
    }
}
