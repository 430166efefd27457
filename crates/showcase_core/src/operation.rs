use std::fmt;

/// One remote call the front-end can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    DescribeImage,
    DescribeImageDetailed,
    AnswerImageQuestion,
    ExtractFileText,
    RecommendBySong,
    RecommendByText,
    Search,
}

/// Independent lifecycle slot. Jobs in different slots never affect each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Description,
    DetailedDescription,
    Answer,
    Extraction,
    Recommendations,
    Search,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Description,
        Slot::DetailedDescription,
        Slot::Answer,
        Slot::Extraction,
        Slot::Recommendations,
        Slot::Search,
    ];
}

impl Operation {
    pub fn slot(self) -> Slot {
        match self {
            Operation::DescribeImage => Slot::Description,
            Operation::DescribeImageDetailed => Slot::DetailedDescription,
            Operation::AnswerImageQuestion => Slot::Answer,
            Operation::ExtractFileText => Slot::Extraction,
            Operation::RecommendBySong | Operation::RecommendByText => Slot::Recommendations,
            Operation::Search => Slot::Search,
        }
    }

    /// Stable kebab-case name used in logs and the terminal front-end.
    pub fn name(self) -> &'static str {
        match self {
            Operation::DescribeImage => "describe-image",
            Operation::DescribeImageDetailed => "describe-image-detailed",
            Operation::AnswerImageQuestion => "answer-image-question",
            Operation::ExtractFileText => "extract-file-text",
            Operation::RecommendBySong => "recommend-by-song",
            Operation::RecommendByText => "recommend-by-text",
            Operation::Search => "search",
        }
    }

    /// Project name shown in the cold-start notice.
    pub fn project_name(self) -> &'static str {
        match self {
            Operation::DescribeImage
            | Operation::DescribeImageDetailed
            | Operation::AnswerImageQuestion => "AI Vision Studio",
            Operation::ExtractFileText => "Universal File Text Formatter",
            Operation::RecommendBySong | Operation::RecommendByText => {
                "Music Recommendation System"
            }
            Operation::Search => "Web Scraping Assistant",
        }
    }

    /// The music page never raised the cold-start notice.
    pub fn shows_notice(self) -> bool {
        !matches!(
            self,
            Operation::RecommendBySong | Operation::RecommendByText
        )
    }

    /// Message used when a transport failure carries no `detail`.
    pub fn transport_fallback(self) -> &'static str {
        match self {
            Operation::DescribeImage => "Error fetching description.",
            Operation::DescribeImageDetailed => "Error fetching detailed description.",
            Operation::AnswerImageQuestion => "Error fetching answer.",
            Operation::ExtractFileText => {
                "An error occurred while uploading and processing the file."
            }
            Operation::RecommendBySong | Operation::RecommendByText => "Something went wrong",
            Operation::Search => "Server error",
        }
    }

    /// Message used when a 2xx body lacks the expected field.
    pub fn missing_result_placeholder(self) -> &'static str {
        match self {
            Operation::DescribeImage => "No description received.",
            Operation::DescribeImageDetailed => "No detailed description received.",
            Operation::AnswerImageQuestion => "No answer received.",
            Operation::ExtractFileText => "No formatted text received.",
            Operation::RecommendBySong | Operation::RecommendByText => {
                "No recommendations received."
            }
            Operation::Search => "No search results received.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
