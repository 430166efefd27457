use std::time::Duration;

use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use showcase_core::{
    Blob, FailureKind, JobError, JobId, JobOutcome, Operation, Request,
};
use showcase_logging::{job_info, job_warn};

use crate::wire::{self, SearchPayload, SongPayload, TextPayload};
use crate::EngineError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Base addresses of the remote services, one per backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub vision: String,
    pub file_extractor: String,
    pub music: String,
    pub search: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            vision: DEFAULT_BASE_URL.to_string(),
            file_extractor: DEFAULT_BASE_URL.to_string(),
            music: DEFAULT_BASE_URL.to_string(),
            search: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Every service behind a single base address.
    pub fn uniform(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            vision: base.clone(),
            file_extractor: base.clone(),
            music: base.clone(),
            search: base,
        }
    }

    pub fn url_for(&self, operation: Operation) -> String {
        let (base, path) = match operation {
            Operation::DescribeImage => (&self.vision, "/image/describe"),
            Operation::DescribeImageDetailed => (&self.vision, "/image/details"),
            Operation::AnswerImageQuestion => (&self.vision, "/image/question"),
            Operation::ExtractFileText => (&self.file_extractor, "/upload/"),
            Operation::RecommendBySong => (&self.music, "/recommend_by_song"),
            Operation::RecommendByText => (&self.music, "/recommend_by_text"),
            Operation::Search => (&self.search, "/search"),
        };
        format!("{}{}", base.trim_end_matches('/'), path)
    }
}

#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub endpoints: Endpoints,
    pub connect_timeout: Duration,
    /// `None` leaves a hung call pending for as long as the connection lives.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            connect_timeout: Duration::from_secs(30),
            request_timeout: None,
            max_bytes: 8 * 1024 * 1024,
        }
    }
}

/// One-shot request/response call to the service behind an operation.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, job_id: JobId, request: &Request) -> JobOutcome;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    settings: TransportSettings,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Result<Self, EngineError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { settings, client })
    }

    fn build(&self, request: &Request) -> Result<reqwest::RequestBuilder, reqwest::Error> {
        let url = self.settings.endpoints.url_for(request.operation());
        let builder = self.client.post(url);
        let builder = match request {
            Request::DescribeImage { image } | Request::DescribeImageDetailed { image } => {
                builder.multipart(Form::new().part("file", file_part(image)?))
            }
            Request::AnswerImageQuestion { image, question } => builder.multipart(
                Form::new()
                    .part("file", file_part(image)?)
                    .text("question", question.clone()),
            ),
            Request::ExtractFileText { file } => {
                builder.multipart(Form::new().part("file", file_part(file)?))
            }
            Request::RecommendBySong {
                song_name,
                num_songs,
            } => builder.json(&SongPayload {
                song_name,
                num_songs: *num_songs,
            }),
            Request::RecommendByText { text, num_songs } => builder.json(&TextPayload {
                text,
                num_songs: *num_songs,
            }),
            Request::Search { query } => builder.json(&SearchPayload { query }),
        };
        Ok(builder)
    }

    async fn read_body(
        &self,
        job_id: JobId,
        operation: Operation,
        response: reqwest::Response,
    ) -> Result<Vec<u8>, JobError> {
        let max_bytes = self.settings.max_bytes;
        let too_large = || {
            job_warn!(job_id, "{} response exceeded {} bytes", operation, max_bytes);
            JobError::new(
                FailureKind::TooLarge { max_bytes },
                operation.transport_fallback(),
            )
        };

        if response
            .content_length()
            .is_some_and(|content_len| content_len > max_bytes)
        {
            return Err(too_large());
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| map_reqwest_error(job_id, operation, &err))?;
            if body.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn call(&self, job_id: JobId, request: &Request) -> JobOutcome {
        let operation = request.operation();
        job_info!(job_id, "POST {}", self.settings.endpoints.url_for(operation));

        let response = self
            .build(request)
            .map_err(|err| map_reqwest_error(job_id, operation, &err))?
            .send()
            .await
            .map_err(|err| map_reqwest_error(job_id, operation, &err))?;

        let status = response.status();
        let body = self.read_body(job_id, operation, response).await?;

        if !status.is_success() {
            let message = wire::error_detail(&body)
                .unwrap_or_else(|| operation.transport_fallback().to_string());
            job_warn!(job_id, "{} returned {}: {}", operation, status, message);
            return Err(JobError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let outcome = wire::parse_success(operation, &body);
        match &outcome {
            Ok(result) => job_info!(job_id, "{} succeeded: {}", operation, result.summary()),
            Err(err) => job_warn!(job_id, "{} sent an unexpected body: {}", operation, err),
        }
        outcome
    }
}

fn file_part(blob: &Blob) -> Result<Part, reqwest::Error> {
    let part = Part::bytes(blob.bytes.to_vec()).file_name(blob.file_name.clone());
    match &blob.content_type {
        Some(content_type) => part.mime_str(content_type),
        None => Ok(part),
    }
}

fn map_reqwest_error(job_id: JobId, operation: Operation, err: &reqwest::Error) -> JobError {
    job_warn!(job_id, "{} transport failure: {}", operation, err);
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Network
    };
    JobError::new(kind, operation.transport_fallback())
}
