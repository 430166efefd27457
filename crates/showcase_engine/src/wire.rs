//! Request bodies and response parsing for the remote services.
use serde::Serialize;
use serde_json::Value;
use showcase_core::{
    FailureKind, JobError, JobOutcome, Operation, OperationResult, Recommendation, SearchResult,
    SearchSource,
};

#[derive(Debug, Serialize)]
pub(crate) struct SongPayload<'a> {
    pub song_name: &'a str,
    pub num_songs: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextPayload<'a> {
    pub text: &'a str,
    pub num_songs: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchPayload<'a> {
    pub query: &'a str,
}

/// Pulls a human-readable message out of an error body's `detail` field.
///
/// A string is used as is. A list of validation entries (`[{"msg": ...}]`)
/// is joined with `; `. Anything else yields `None`.
pub fn error_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

/// Parses a 2xx body into the operation's result schema.
pub fn parse_success(operation: Operation, body: &[u8]) -> JobOutcome {
    let unknown = || {
        JobError::new(
            FailureKind::UnknownResponse,
            operation.missing_result_placeholder(),
        )
    };

    match operation {
        Operation::DescribeImage => required_text(body, "description")
            .map(OperationResult::Description)
            .ok_or_else(unknown),
        Operation::DescribeImageDetailed => required_text(body, "detailed_description")
            .map(OperationResult::DetailedDescription)
            .ok_or_else(unknown),
        Operation::AnswerImageQuestion => required_text(body, "answer")
            .map(OperationResult::Answer)
            .ok_or_else(unknown),
        Operation::ExtractFileText => required_text(body, "formatted_text")
            .map(OperationResult::FormattedText)
            .ok_or_else(unknown),
        Operation::RecommendBySong | Operation::RecommendByText => {
            serde_json::from_slice::<Vec<Recommendation>>(body)
                .map(OperationResult::Recommendations)
                .map_err(|_| unknown())
        }
        Operation::Search => serde_json::from_slice::<SearchResult>(body)
            .ok()
            .filter(search_is_renderable)
            .map(OperationResult::Search)
            .ok_or_else(unknown),
    }
}

fn required_text(body: &[u8], field: &str) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

/// A gemini answer needs text; a video source needs a result list.
fn search_is_renderable(result: &SearchResult) -> bool {
    match result.source {
        SearchSource::Gemini => result
            .answer
            .as_deref()
            .is_some_and(|answer| !answer.is_empty()),
        SearchSource::GoogleVideos | SearchSource::Youtube => result.results.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_core::ReleaseYear;

    #[test]
    fn detail_string_is_used() {
        assert_eq!(
            error_detail(br#"{"detail": "bad file"}"#),
            Some("bad file".to_string())
        );
    }

    #[test]
    fn detail_list_is_joined() {
        let body = br#"{"detail": [{"loc": ["body", "query"], "msg": "field required"},
                                   {"msg": "too short"}]}"#;
        assert_eq!(
            error_detail(body),
            Some("field required; too short".to_string())
        );
    }

    #[test]
    fn missing_or_odd_detail_is_none() {
        assert_eq!(error_detail(b"<html>502</html>"), None);
        assert_eq!(error_detail(br#"{"error": "x"}"#), None);
        assert_eq!(error_detail(br#"{"detail": 17}"#), None);
        assert_eq!(error_detail(br#"{"detail": ""}"#), None);
    }

    #[test]
    fn empty_description_is_unknown_response() {
        let err = parse_success(Operation::DescribeImage, br#"{"description": ""}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::UnknownResponse);
        assert_eq!(err.message, "No description received.");
    }

    #[test]
    fn recommendations_accept_numeric_and_text_years() {
        let body = br#"[{"song": "Yesterday", "singer": "The Beatles", "year": 1965},
                        {"song": "Hurt", "singer": "Johnny Cash", "year": "2002"}]"#;
        let result = parse_success(Operation::RecommendByText, body).unwrap();
        let OperationResult::Recommendations(items) = result else {
            panic!("expected recommendations");
        };
        assert_eq!(items[0].year, ReleaseYear::Number(1965));
        assert_eq!(items[1].year, ReleaseYear::Text("2002".into()));
    }

    #[test]
    fn recommendations_must_be_a_list() {
        let err = parse_success(Operation::RecommendBySong, br#"{"song": "x"}"#).unwrap_err();
        assert_eq!(err.message, "No recommendations received.");
    }

    #[test]
    fn search_sources_are_validated() {
        let video = br#"{"source": "youtube", "results": [{"title": "Intro", "link": "https://y/1"}]}"#;
        assert!(parse_success(Operation::Search, video).is_ok());

        let no_results = br#"{"source": "google_videos"}"#;
        assert!(parse_success(Operation::Search, no_results).is_err());

        let unknown_source = br#"{"source": "bing", "answer": "hi"}"#;
        let err = parse_success(Operation::Search, unknown_source).unwrap_err();
        assert_eq!(err.kind, FailureKind::UnknownResponse);
    }
}
