//! Success shapes returned by the remote services.
//!
//! The engine parses wire bodies into these types; anything that does not fit
//! becomes an unknown-response failure instead of a silent placeholder.
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    Description(String),
    DetailedDescription(String),
    Answer(String),
    FormattedText(String),
    Recommendations(Vec<Recommendation>),
    Search(SearchResult),
}

impl OperationResult {
    /// One-line summary for logs and the status bar.
    pub fn summary(&self) -> String {
        match self {
            OperationResult::Description(text)
            | OperationResult::DetailedDescription(text)
            | OperationResult::Answer(text)
            | OperationResult::FormattedText(text) => {
                format!("{} chars", text.chars().count())
            }
            OperationResult::Recommendations(items) => format!("{} songs", items.len()),
            OperationResult::Search(result) => match result.source {
                SearchSource::Gemini => "answer from gemini".to_string(),
                _ => format!(
                    "{} videos from {}",
                    result.results.as_ref().map_or(0, Vec::len),
                    result.source
                ),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub song: String,
    pub singer: String,
    pub year: ReleaseYear,
}

/// Services disagree on whether the year is a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReleaseYear {
    Number(i64),
    Text(String),
}

impl fmt::Display for ReleaseYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseYear::Number(year) => write!(f, "{year}"),
            ReleaseYear::Text(year) => f.write_str(year),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub source: SearchSource,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<VideoResult>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSource {
    Gemini,
    GoogleVideos,
    Youtube,
}

impl fmt::Display for SearchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchSource::Gemini => "gemini",
            SearchSource::GoogleVideos => "google_videos",
            SearchSource::Youtube => "youtube",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResult {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub views: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
