use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use showcase_core::{
    Blob, FailureKind, Operation, OperationResult, Recommendation, ReleaseYear, Request,
    SearchSource,
};
use showcase_engine::{Endpoints, ReqwestTransport, Transport, TransportSettings};
use wiremock::matchers::{body_json, body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> ReqwestTransport {
    transport_with(server, |_| {})
}

fn transport_with(
    server: &MockServer,
    tweak: impl FnOnce(&mut TransportSettings),
) -> ReqwestTransport {
    let mut settings = TransportSettings {
        endpoints: Endpoints::uniform(server.uri()),
        ..TransportSettings::default()
    };
    tweak(&mut settings);
    ReqwestTransport::new(settings).expect("client builds")
}

fn image() -> Blob {
    Blob::new("cat.png", b"fake png bytes".to_vec()).with_content_type("image/png")
}

#[tokio::test]
async fn describe_image_returns_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/image/describe"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("filename=\"cat.png\""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(50))
                .set_body_json(json!({ "description": "a cat" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = transport_for(&server)
        .call(1, &Request::DescribeImage { image: image() })
        .await;
    assert_eq!(outcome, Ok(OperationResult::Description("a cat".into())));
}

#[tokio::test]
async fn http_error_uses_detail_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/image/describe"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": "bad file" })))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .call(2, &Request::DescribeImage { image: image() })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert_eq!(err.message, "bad file");
    assert!(err.is_transport());
}

#[tokio::test]
async fn http_error_without_detail_uses_operation_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .call(
            3,
            &Request::ExtractFileText {
                file: Blob::new("report.pdf", b"%PDF-1.7".to_vec()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
    assert_eq!(
        err.message,
        "An error occurred while uploading and processing the file."
    );
}

#[tokio::test]
async fn missing_success_field_is_unknown_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/image/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "description": "wrong" })))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .call(4, &Request::DescribeImageDetailed { image: image() })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::UnknownResponse);
    assert_eq!(err.message, "No detailed description received.");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn question_is_sent_alongside_the_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/image/question"))
        .and(body_string_contains("name=\"question\""))
        .and(body_string_contains("what colour is it?"))
        .and(body_string_contains("name=\"file\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "ginger" })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = transport_for(&server)
        .call(
            5,
            &Request::AnswerImageQuestion {
                image: image(),
                question: "what colour is it?".into(),
            },
        )
        .await;
    assert_eq!(outcome, Ok(OperationResult::Answer("ginger".into())));
}

#[tokio::test]
async fn recommendations_post_json_and_parse_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/recommend_by_song"))
        .and(body_json(json!({ "song_name": "Yesterday", "num_songs": 2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "song": "Michelle", "singer": "The Beatles", "year": 1965 },
            { "song": "Vincent", "singer": "Don McLean", "year": "1971" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = transport_for(&server)
        .call(
            6,
            &Request::RecommendBySong {
                song_name: "Yesterday".into(),
                num_songs: 2,
            },
        )
        .await;
    assert_eq!(
        outcome,
        Ok(OperationResult::Recommendations(vec![
            Recommendation {
                song: "Michelle".into(),
                singer: "The Beatles".into(),
                year: ReleaseYear::Number(1965),
            },
            Recommendation {
                song: "Vincent".into(),
                singer: "Don McLean".into(),
                year: ReleaseYear::Text("1971".into()),
            },
        ]))
    );
}

#[tokio::test]
async fn recommend_by_text_posts_text_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/recommend_by_text"))
        .and(body_json(json!({ "text": "late night drive", "num_songs": 5 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = transport_for(&server)
        .call(
            7,
            &Request::RecommendByText {
                text: "late night drive".into(),
                num_songs: 5,
            },
        )
        .await;
    assert_eq!(outcome, Ok(OperationResult::Recommendations(Vec::new())));
}

#[tokio::test]
async fn search_parses_video_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_json(json!({ "query": "rust ownership" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "source": "youtube",
            "results": [
                { "title": "Ownership explained", "link": "https://youtube.com/watch?v=1",
                  "channel": "Rustacean", "views": "12K views" }
            ]
        })))
        .mount(&server)
        .await;

    let outcome = transport_for(&server)
        .call(
            8,
            &Request::Search {
                query: "rust ownership".into(),
            },
        )
        .await
        .expect("search ok");
    let OperationResult::Search(result) = outcome else {
        panic!("expected search result");
    };
    assert_eq!(result.source, SearchSource::Youtube);
    let videos = result.results.expect("videos");
    assert_eq!(videos[0].channel.as_deref(), Some("Rustacean"));
    assert_eq!(videos[0].description, None);
}

#[tokio::test]
async fn slow_service_times_out_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "source": "gemini", "answer": "late" })),
        )
        .mount(&server)
        .await;

    let transport = transport_with(&server, |settings| {
        settings.request_timeout = Some(Duration::from_millis(50));
    });
    let err = transport
        .call(9, &Request::Search { query: "x".into() })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
    assert_eq!(err.message, "Server error");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/image/describe"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "description": "x".repeat(64) })),
        )
        .mount(&server)
        .await;

    let transport = transport_with(&server, |settings| settings.max_bytes = 16);
    let err = transport
        .call(10, &Request::DescribeImage { image: image() })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::TooLarge { max_bytes: 16 });
}

#[tokio::test]
async fn unreachable_service_is_network_failure() {
    let settings = TransportSettings {
        endpoints: Endpoints::uniform("http://127.0.0.1:9"),
        connect_timeout: Duration::from_millis(200),
        ..TransportSettings::default()
    };
    let err = ReqwestTransport::new(settings)
        .unwrap()
        .call(
            11,
            &Request::RecommendByText {
                text: "x".into(),
                num_songs: 1,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
    assert_eq!(err.message, "Something went wrong");
}

#[test]
fn endpoint_urls_ignore_trailing_slash() {
    let endpoints = Endpoints {
        vision: "https://vision.example/".into(),
        file_extractor: "https://files.example".into(),
        music: "https://music.example//".into(),
        search: "https://search.example".into(),
    };
    assert_eq!(
        endpoints.url_for(Operation::DescribeImage),
        "https://vision.example/image/describe"
    );
    assert_eq!(
        endpoints.url_for(Operation::ExtractFileText),
        "https://files.example/upload/"
    );
    assert_eq!(
        endpoints.url_for(Operation::RecommendByText),
        "https://music.example/recommend_by_text"
    );
    assert_eq!(
        endpoints.url_for(Operation::Search),
        "https://search.example/search"
    );
}
