use chrono::Utc;
use showcase_core::{
    filter_projects, update, AppState, Effect, Msg, Submission, TimerId, TimerKind, Slot,
    PROJECTS,
};

fn submit(state: AppState, submission: Submission) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::SubmitRequested {
            submission,
            at: Utc::now(),
        },
    )
}

#[test]
fn notice_tracks_elapsed_time() {
    let (mut state, _) = submit(
        AppState::new(),
        Submission::Search {
            query: "rust".into(),
        },
    );
    let notice = state.view().notice.expect("notice shown");
    assert_eq!(notice.project, "Web Scraping Assistant");
    assert_eq!(notice.elapsed_label, "0:00");

    for _ in 0..65 {
        state = update(
            state,
            Msg::TimerFired(TimerId {
                kind: TimerKind::Elapsed(Slot::Search),
                generation: 1,
            }),
        )
        .0;
    }
    let notice = state.view().notice.expect("notice shown");
    assert_eq!(notice.elapsed_seconds, 65);
    assert_eq!(notice.elapsed_label, "1:05");
}

#[test]
fn recommendations_never_show_notice() {
    let (state, effects) = submit(
        AppState::new(),
        Submission::RecommendBySong {
            song_name: "Bohemian Rhapsody".into(),
            num_songs: 5,
        },
    );
    assert_eq!(effects.len(), 2);
    assert_eq!(state.view().notice, None);
}

#[test]
fn notice_disappears_on_resolution() {
    let (state, _) = submit(
        AppState::new(),
        Submission::Search {
            query: "rust".into(),
        },
    );
    let (state, _) = update(
        state,
        Msg::JobCompleted {
            job_id: 1,
            result: Err(showcase_core::JobError::new(
                showcase_core::FailureKind::Network,
                "Server error",
            )),
        },
    );
    assert_eq!(state.view().notice, None);
}

#[test]
fn dirty_flag_is_consumed_once() {
    let (mut state, _) = submit(
        AppState::new(),
        Submission::Search {
            query: "rust".into(),
        },
    );
    assert!(state.view().dirty);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn project_filter_matches_title_description_and_tags() {
    assert_eq!(filter_projects("").len(), PROJECTS.len());
    assert_eq!(filter_projects("   ").len(), PROJECTS.len());

    let ids = |query: &str| {
        filter_projects(query)
            .iter()
            .map(|project| project.id)
            .collect::<Vec<_>>()
    };
    assert_eq!(ids("MUSIC"), vec!["music-recommendation"]);
    assert_eq!(ids("youtube"), vec!["web-scraping"]);
    assert_eq!(ids("computer vision"), vec!["ai-vision-studio"]);
    assert!(ids("blockchain").is_empty());
}

#[test]
fn project_filter_message_updates_view() {
    let (state, _) = update(AppState::new(), Msg::ProjectFilterChanged("vision".into()));
    let titles: Vec<_> = state.view().projects.iter().map(|p| p.title).collect();
    assert_eq!(titles, vec!["AI Vision Studio"]);
}
