//! The project gallery shown on the landing view.
use crate::Operation;

#[derive(Debug, PartialEq, Eq)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub features: &'static [&'static str],
    pub operations: &'static [Operation],
}

pub static PROJECTS: [Project; 4] = [
    Project {
        id: "music-recommendation",
        title: "Music Recommendation System",
        description: "AI-powered music recommendation engine that suggests songs based on your \
                      preferences or text descriptions using advanced machine learning algorithms.",
        tags: &["Machine Learning", "Music", "Recommendation", "AI"],
        features: &[
            "Song-based recommendations",
            "Text-based discovery",
            "Personalized suggestions",
        ],
        operations: &[Operation::RecommendBySong, Operation::RecommendByText],
    },
    Project {
        id: "web-scraping",
        title: "Intelligent Web Scraping Assistant",
        description: "Smart web scraping tool that intelligently searches and extracts information \
                      from various sources including Google Videos and YouTube.",
        tags: &["Web Scraping", "Search", "Data Extraction", "AI"],
        features: &[
            "Multi-source search",
            "Video content discovery",
            "AI-powered results",
        ],
        operations: &[Operation::Search],
    },
    Project {
        id: "ai-vision-studio",
        title: "AI Vision Studio",
        description: "Real-time object identification powered by Gemini AI. Capture, upload, or \
                      stream live video for intelligent image analysis and Q&A.",
        tags: &["Computer Vision", "Image Analysis", "Real-time", "AI"],
        features: &["Real-time analysis", "Image Q&A", "Multi-mode capture"],
        operations: &[
            Operation::DescribeImage,
            Operation::DescribeImageDetailed,
            Operation::AnswerImageQuestion,
        ],
    },
    Project {
        id: "file-text-extractor-formatter",
        title: "Universal File Text Formatter",
        description: "Extract and format text from various file types including documents, \
                      spreadsheets, images, and archives using AI-powered processing.",
        tags: &["Document Processing", "OCR", "Formatting", "AI"],
        features: &["Many file formats", "Formatted output", "Archive support"],
        operations: &[Operation::ExtractFileText],
    },
];

/// Case-insensitive match on title, description, or any tag. An empty query
/// matches every project.
pub fn filter_projects(query: &str) -> Vec<&'static Project> {
    let needle = query.trim().to_lowercase();
    PROJECTS
        .iter()
        .filter(|project| {
            needle.is_empty()
                || project.title.to_lowercase().contains(&needle)
                || project.description.to_lowercase().contains(&needle)
                || project
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        })
        .collect()
}
