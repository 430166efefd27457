//! Parsing of terminal command lines.

use std::path::PathBuf;

use showcase_core::{CaptureMode, JobId};
use thiserror::Error;

use super::constants::DEFAULT_SONG_COUNT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Projects(String),
    Mode(CaptureMode),
    Describe(PathBuf),
    Capture,
    Recapture,
    Details,
    Ask(String),
    Extract(PathBuf),
    Song { name: String, count: u32 },
    Mood { text: String, count: u32 },
    Search(String),
    Dismiss(Option<JobId>),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command `{0}`; type `help` for a list")]
    Unknown(String),
    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("`{0}` is not a mode; use realtime, upload, or capture")]
    InvalidMode(String),
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
}

/// Returns `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, InputError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "projects" => Command::Projects(rest.to_string()),
        "mode" => Command::Mode(parse_mode(rest)?),
        "describe" => Command::Describe(required_path(rest, "describe", "an image path")?),
        "capture" => Command::Capture,
        "recapture" => Command::Recapture,
        "details" => Command::Details,
        "ask" => Command::Ask(rest.to_string()),
        "extract" => Command::Extract(required_path(rest, "extract", "a file path")?),
        "song" => {
            let (name, count) = split_count(rest)?;
            Command::Song { name, count }
        }
        "mood" => {
            let (text, count) = split_count(rest)?;
            Command::Mood { text, count }
        }
        "search" => Command::Search(rest.to_string()),
        "dismiss" => Command::Dismiss(if rest.is_empty() {
            None
        } else {
            Some(parse_number(rest)?)
        }),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_mode(text: &str) -> Result<CaptureMode, InputError> {
    match text.to_ascii_lowercase().as_str() {
        "realtime" | "live" => Ok(CaptureMode::Realtime),
        "upload" => Ok(CaptureMode::Upload),
        "capture" => Ok(CaptureMode::Capture),
        "" => Err(InputError::MissingArgument {
            command: "mode",
            what: "realtime, upload, or capture",
        }),
        other => Err(InputError::InvalidMode(other.to_string())),
    }
}

fn required_path(
    text: &str,
    command: &'static str,
    what: &'static str,
) -> Result<PathBuf, InputError> {
    if text.is_empty() {
        return Err(InputError::MissingArgument { command, what });
    }
    Ok(PathBuf::from(text.trim_matches('"')))
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T, InputError> {
    text.parse()
        .map_err(|_| InputError::InvalidNumber(text.to_string()))
}

/// Splits an optional trailing `--count N` off free text. A `--count`
/// anywhere else is part of the text. Empty text is passed through so
/// validation can report it.
fn split_count(text: &str) -> Result<(String, u32), InputError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        [words @ .., "--count", value] => Ok((words.join(" "), parse_number(value)?)),
        [.., "--count"] => Err(InputError::MissingArgument {
            command: "--count",
            what: "a number",
        }),
        words => Ok((words.join(" "), DEFAULT_SONG_COUNT)),
    }
}
