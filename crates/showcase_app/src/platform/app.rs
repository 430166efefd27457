use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use chrono::Utc;
use showcase_core::{update, AppState, AppViewModel, Blob, CaptureMode, JobId, Msg, Submission};
use showcase_engine::{EngineEvent, EngineHandle, ReqwestTransport};
use showcase_logging::{showcase_info, showcase_warn};

use super::capture::{load_blob, FileFrameSource};
use super::config::ShowcaseConfig;
use super::effects::{engine_msg, EffectRunner, InboxSink};
use super::logging;
use super::ui::constants::{HELP, PROMPT};
use super::ui::input::{parse_command, Command};
use super::ui::render;

/// Everything the main loop waits on.
pub enum Inbound {
    Engine(EngineEvent),
    Line(String),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = ShowcaseConfig::load()?;
    logging::initialize(config.log_destination, config.level_filter());
    showcase_info!(
        "Starting showcase: vision={} extractor={} music={} search={} policy={:?}",
        config.vision_url,
        config.file_extractor_url,
        config.music_url,
        config.search_url,
        config.resolution_policy
    );

    let (inbox_tx, inbox_rx) = mpsc::channel();
    let transport =
        ReqwestTransport::new(config.transport_settings()).context("building HTTP client")?;
    let engine = EngineHandle::spawn(
        Arc::new(transport),
        Arc::new(InboxSink::new(inbox_tx.clone())),
    )
    .context("starting engine")?;
    let frames = FileFrameSource::new(config.live_frame_path.clone());
    let mut app = App::new(
        AppState::with_policy(config.resolution_policy.into()),
        EffectRunner::new(engine, Box::new(frames)),
    );

    spawn_stdin_reader(inbox_tx);

    print_lines(HELP.iter().copied());
    print_lines(render::render_projects(&app.view.projects));
    if config.start_live {
        app.dispatch(Msg::CaptureModeSelected(CaptureMode::Realtime));
    }
    prompt();

    while let Ok(inbound) = inbox_rx.recv() {
        match inbound {
            Inbound::Engine(event) => app.dispatch(engine_msg(event)),
            Inbound::Line(line) => {
                if app.handle_line(&line).is_break() {
                    break;
                }
                prompt();
            }
            Inbound::InputClosed => break,
        }
    }

    showcase_info!("Shutting down");
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
    view: AppViewModel,
}

impl App {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        let view = state.view();
        Self {
            state,
            runner,
            view,
        }
    }

    /// Runs `update` for the message and for any follow-up messages its
    /// effects produce, printing what changed after each step.
    fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            queue.extend(self.runner.run(effects));
            if state.consume_dirty() {
                let view = state.view();
                print_lines(render::render_changes(&self.view, &view));
                self.view = view;
            }
            self.state = state;
        }
    }

    fn submit(&mut self, submission: Submission) {
        self.dispatch(Msg::SubmitRequested {
            submission,
            at: Utc::now(),
        });
    }

    fn handle_line(&mut self, line: &str) -> ControlFlow<()> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return ControlFlow::Continue(()),
            Err(err) => {
                println!("{err}");
                return ControlFlow::Continue(());
            }
        };

        match command {
            Command::Quit => return ControlFlow::Break(()),
            Command::Help => print_lines(HELP.iter().copied()),
            Command::Status => print_lines(render::render_full(&self.view)),
            Command::Projects(filter) => {
                self.dispatch(Msg::ProjectFilterChanged(filter));
                print_lines(render::render_projects(&self.view.projects));
            }
            Command::Mode(mode) => self.dispatch(Msg::CaptureModeSelected(mode)),
            Command::Describe(path) => {
                let image = read_upload(&path);
                self.submit(Submission::DescribeImage { image });
            }
            Command::Capture => {
                let captured = self.runner.grab_frame();
                if matches!(captured, Msg::FrameCaptured { frame: None, .. }) {
                    println!("No frame available; set live_frame_path in showcase.ron");
                }
                self.dispatch(captured);
            }
            Command::Recapture => self.dispatch(Msg::RecaptureClicked),
            Command::Details => self.submit(Submission::DescribeImageDetailed),
            Command::Ask(question) => self.submit(Submission::AnswerImageQuestion { question }),
            Command::Extract(path) => {
                let file = read_upload(&path);
                self.submit(Submission::ExtractFileText { file });
            }
            Command::Song { name, count } => self.submit(Submission::RecommendBySong {
                song_name: name,
                num_songs: count,
            }),
            Command::Mood { text, count } => self.submit(Submission::RecommendByText {
                text,
                num_songs: count,
            }),
            Command::Search(query) => self.submit(Submission::Search { query }),
            Command::Dismiss(job_id) => self.dismiss(job_id),
        }
        ControlFlow::Continue(())
    }

    fn dismiss(&mut self, job_id: Option<JobId>) {
        let Some(job_id) = job_id.or_else(|| self.view.notice.as_ref().map(|n| n.job_id)) else {
            println!("Nothing to dismiss");
            return;
        };
        self.dispatch(Msg::DismissNotice { job_id });

        let still_pending = self.state.job(job_id).is_some_and(|job| job.is_pending());
        if still_pending {
            println!("Job {job_id} continues in the background");
            self.runner.on_resolve(job_id, |handle, outcome| {
                let summary = match outcome {
                    Ok(result) => result.summary(),
                    Err(err) => err.message.clone(),
                };
                println!(
                    "\x07Job {} ({}) finished in the background: {}",
                    handle.job_id, handle.operation, summary
                );
            });
        }
    }
}

/// A file that cannot be read becomes a missing upload, which validation reports.
fn read_upload(path: &Path) -> Option<Blob> {
    match load_blob(path) {
        Ok(blob) => Some(blob),
        Err(err) => {
            showcase_warn!("Could not read {}: {}", path.display(), err);
            println!("Could not read {}: {}", path.display(), err);
            None
        }
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Inbound::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    showcase_warn!("stdin read failed: {}", err);
                    break;
                }
            }
        }
        let _ = tx.send(Inbound::InputClosed);
    });
}

fn print_lines<I>(lines: I)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = io::stdout().lock();
    for line in lines {
        let _ = writeln!(out, "{}", line.as_ref());
    }
}

fn prompt() {
    let mut out = io::stdout().lock();
    let _ = write!(out, "{PROMPT}");
    let _ = out.flush();
}
