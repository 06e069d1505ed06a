//! Mock HTTP client for testing.
//!
//! Returns scripted responses per URL and records every request for
//! verification. Streaming responses replay an exact chunk sequence,
//! which lets tests split payloads at arbitrary byte offsets, including
//! inside multi-byte UTF-8 characters.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::http::ByteStream;
use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL.
    pub url: String,
    /// Request headers.
    pub headers: Headers,
    /// Request body.
    pub body: String,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a buffered response.
    Success(Response),
    /// Return an error.
    Error(HttpError),
    /// Return this exact chunk sequence from a streaming request.
    Stream(Vec<Bytes>),
    /// Return these chunks, then an error mid-stream.
    StreamThenError(Vec<Bytes>, HttpError),
    /// Open the stream, then never yield a chunk.
    StreamPending,
}

/// Mock HTTP client replaying scripted responses.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock client with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for a URL. Matched exactly, then by prefix.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    /// All requests made so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, url: &str, headers: &Headers, body: &str) {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
        });
    }

    fn response_for(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }
        responses
            .iter()
            .find(|(pattern, _)| url.starts_with(pattern.as_str()))
            .map(|(_, response)| response.clone())
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record(url, headers, body);

        match self.response_for(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(_) => Err(HttpError::Other(
                "Stream response scripted for buffered request".to_string(),
            )),
            None => Err(HttpError::Other(format!("No mock response for {}", url))),
        }
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record(url, headers, body);

        match self.response_for(url) {
            Some(MockResponse::Stream(chunks)) => {
                Ok(Box::pin(futures::stream::iter(chunks.into_iter().map(Ok))))
            }
            Some(MockResponse::StreamThenError(chunks, err)) => {
                let items: Vec<Result<Bytes, HttpError>> =
                    chunks.into_iter().map(Ok).chain([Err(err)]).collect();
                Ok(Box::pin(futures::stream::iter(items)))
            }
            Some(MockResponse::StreamPending) => Ok(Box::pin(futures::stream::pending())),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Success(_)) => Err(HttpError::Other(
                "Buffered response scripted for stream request".to_string(),
            )),
            None => Err(HttpError::Other(format!("No mock response for {}", url))),
        }
    }
}
