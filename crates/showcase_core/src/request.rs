use std::fmt;

use bytes::Bytes;
use thiserror::Error;

use crate::Operation;

/// Inclusive bounds for the number of songs a recommendation may ask for.
pub const MIN_SONGS: u32 = 1;
pub const MAX_SONGS: u32 = 20;

/// A file or image picked by the user, held in memory until it is sent.
#[derive(Clone, PartialEq, Eq)]
pub struct Blob {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl Blob {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// What the user asked for, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    DescribeImage { image: Option<Blob> },
    DescribeImageDetailed,
    AnswerImageQuestion { question: String },
    ExtractFileText { file: Option<Blob> },
    RecommendBySong { song_name: String, num_songs: u32 },
    RecommendByText { text: String, num_songs: u32 },
    Search { query: String },
}

/// A validated payload bound to one operation, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    DescribeImage { image: Blob },
    DescribeImageDetailed { image: Blob },
    AnswerImageQuestion { image: Blob, question: String },
    ExtractFileText { file: Blob },
    RecommendBySong { song_name: String, num_songs: u32 },
    RecommendByText { text: String, num_songs: u32 },
    Search { query: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No image available. Please capture or upload one first.")]
    NoImage,
    #[error("Please enter a question.")]
    EmptyQuestion,
    #[error("Please select a file first!")]
    NoFile,
    #[error("Please enter a song name.")]
    EmptySongName,
    #[error("Please describe what you want to listen to.")]
    EmptyText,
    #[error("Number of songs must be between 1 and 20 (got {requested}).")]
    SongCountOutOfRange { requested: u32 },
    #[error("Please enter a search query.")]
    EmptyQuery,
}

impl Submission {
    pub fn operation(&self) -> Operation {
        match self {
            Submission::DescribeImage { .. } => Operation::DescribeImage,
            Submission::DescribeImageDetailed => Operation::DescribeImageDetailed,
            Submission::AnswerImageQuestion { .. } => Operation::AnswerImageQuestion,
            Submission::ExtractFileText { .. } => Operation::ExtractFileText,
            Submission::RecommendBySong { .. } => Operation::RecommendBySong,
            Submission::RecommendByText { .. } => Operation::RecommendByText,
            Submission::Search { .. } => Operation::Search,
        }
    }

    /// Checks required fields and binds the last described image where the
    /// operation needs one.
    pub fn validate(self, last_image: Option<&Blob>) -> Result<Request, ValidationError> {
        match self {
            Submission::DescribeImage { image } => match image {
                Some(image) if !image.is_empty() => Ok(Request::DescribeImage { image }),
                _ => Err(ValidationError::NoImage),
            },
            Submission::DescribeImageDetailed => last_image
                .cloned()
                .map(|image| Request::DescribeImageDetailed { image })
                .ok_or(ValidationError::NoImage),
            Submission::AnswerImageQuestion { question } => {
                let question = question.trim();
                if question.is_empty() {
                    return Err(ValidationError::EmptyQuestion);
                }
                let image = last_image.cloned().ok_or(ValidationError::NoImage)?;
                Ok(Request::AnswerImageQuestion {
                    image,
                    question: question.to_owned(),
                })
            }
            Submission::ExtractFileText { file } => file
                .map(|file| Request::ExtractFileText { file })
                .ok_or(ValidationError::NoFile),
            Submission::RecommendBySong {
                song_name,
                num_songs,
            } => {
                let song_name = song_name.trim();
                if song_name.is_empty() {
                    return Err(ValidationError::EmptySongName);
                }
                check_song_count(num_songs)?;
                Ok(Request::RecommendBySong {
                    song_name: song_name.to_owned(),
                    num_songs,
                })
            }
            Submission::RecommendByText { text, num_songs } => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(ValidationError::EmptyText);
                }
                check_song_count(num_songs)?;
                Ok(Request::RecommendByText {
                    text: text.to_owned(),
                    num_songs,
                })
            }
            Submission::Search { query } => {
                let query = query.trim();
                if query.is_empty() {
                    return Err(ValidationError::EmptyQuery);
                }
                Ok(Request::Search {
                    query: query.to_owned(),
                })
            }
        }
    }
}

fn check_song_count(requested: u32) -> Result<(), ValidationError> {
    if (MIN_SONGS..=MAX_SONGS).contains(&requested) {
        Ok(())
    } else {
        Err(ValidationError::SongCountOutOfRange { requested })
    }
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Request::DescribeImage { .. } => Operation::DescribeImage,
            Request::DescribeImageDetailed { .. } => Operation::DescribeImageDetailed,
            Request::AnswerImageQuestion { .. } => Operation::AnswerImageQuestion,
            Request::ExtractFileText { .. } => Operation::ExtractFileText,
            Request::RecommendBySong { .. } => Operation::RecommendBySong,
            Request::RecommendByText { .. } => Operation::RecommendByText,
            Request::Search { .. } => Operation::Search,
        }
    }
}
