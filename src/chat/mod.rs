//! Chat service: message submission and streaming response handling.
//!
//! [`ChatService`] owns the [`MessageStore`] and drives the streaming
//! loop: it POSTs the user's message to the chat endpoint, appends an
//! empty assistant message, and rewrites that message's text as stream
//! payloads accumulate. Transport failures are recovered locally by
//! appending a fixed apology message; they never propagate to the caller.
//!
//! At most one stream is active at a time: starting another while one is
//! running is rejected with [`ChatError::StreamInProgress`].

mod cancel;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::StreamExt;

use crate::config::ChatConfig;
use crate::error::{ChatError, StreamError};
use crate::models::{Message, StreamRequest};
use crate::session::SessionHandle;
use crate::sse::{AccumulatorSignal, LineSplitter, StreamAccumulator, Utf8StreamDecoder};
use crate::store::{MessageStore, ASSISTANT_SENDER};
use crate::traits::{Headers, HttpClient, HttpError};

/// Fixed message appended when a streaming response fails.
pub const FALLBACK_TEXT: &str = "Sorry, something went wrong. Please try again later.";

/// Sender name for the local user when no profile is available.
const DEFAULT_OWN_SENDER: &str = "You";

/// Service driving chat message submission and response streaming.
pub struct ChatService {
    http: Arc<dyn HttpClient>,
    session: SessionHandle,
    config: ChatConfig,
    store: MessageStore,
    streaming: Arc<AtomicBool>,
}

/// Marks a stream active for its lifetime.
///
/// The flag clears on drop, including when the owning send future is
/// dropped at an await point (timeout, select).
struct StreamGuard {
    flag: Arc<AtomicBool>,
}

impl StreamGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(Self { flag: flag.clone() })
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl ChatService {
    /// Create the service with a store seeded with the welcome message.
    pub fn new(http: Arc<dyn HttpClient>, session: SessionHandle, config: ChatConfig) -> Self {
        Self {
            http,
            session,
            config,
            store: MessageStore::new(),
            streaming: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Read access to the message list.
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Mutable access to the message list.
    pub fn store_mut(&mut self) -> &mut MessageStore {
        &mut self.store
    }

    /// Whether a streaming response is currently active.
    pub fn is_streaming(&self) -> bool {
        self.streaming.load(Ordering::Acquire)
    }

    /// Send a message and stream the response into the store.
    pub async fn send_stream_message(&mut self, content: &str) -> Result<(), ChatError> {
        self.send_inner(content, None).await
    }

    /// Send a message with a cancellation token honored at each read.
    ///
    /// Cancellation keeps any partial response text and completes
    /// normally.
    pub async fn send_stream_message_cancellable(
        &mut self,
        content: &str,
        cancel: CancelToken,
    ) -> Result<(), ChatError> {
        self.send_inner(content, Some(cancel)).await
    }

    async fn send_inner(
        &mut self,
        content: &str,
        cancel: Option<CancelToken>,
    ) -> Result<(), ChatError> {
        let _guard =
            StreamGuard::acquire(&self.streaming).ok_or(ChatError::StreamInProgress)?;

        let sender = self
            .session
            .snapshot()
            .user
            .map(|u| u.display_name)
            .unwrap_or_else(|| DEFAULT_OWN_SENDER.to_string());
        self.store.append(Message::new(content, sender, true));

        let result = self.run_stream(content, cancel).await;

        if let Err(e) = result {
            tracing::warn!(code = e.error_code(), error = %e, "chat stream failed");
            self.store
                .append(Message::new(FALLBACK_TEXT, ASSISTANT_SENDER, false));
        }

        Ok(())
    }

    /// Open the stream and accumulate payloads into the assistant slot.
    ///
    /// The empty assistant message is appended only once the response
    /// stream is open; earlier failures leave no abandoned slot behind.
    async fn run_stream(
        &mut self,
        content: &str,
        mut cancel: Option<CancelToken>,
    ) -> Result<(), StreamError> {
        let request = StreamRequest::new(content, &self.config.platform, &self.config.app);
        let body = serde_json::to_string(&request)?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Platform".to_string(), self.config.platform.clone());
        headers.insert("App".to_string(), self.config.app.clone());
        headers.extend(self.session.auth_headers());

        let mut stream = self
            .http
            .post_stream(&self.config.stream_url(), &body, &headers)
            .await
            .map_err(|e| match e {
                HttpError::ServerError { status, message } => {
                    StreamError::ServerError { status, message }
                }
                other => StreamError::ConnectionFailed {
                    message: other.to_string(),
                },
            })?;

        tracing::debug!("response stream opened");
        self.store
            .append(Message::new("", ASSISTANT_SENDER, false));

        let mut decoder = Utf8StreamDecoder::new();
        let mut splitter = LineSplitter::new();
        let mut accumulator = StreamAccumulator::new();

        loop {
            let chunk = match cancel.as_mut() {
                Some(token) => tokio::select! {
                    // Checked first so cancellation wins over a ready chunk.
                    biased;
                    _ = token.cancelled() => {
                        tracing::debug!("stream cancelled by caller");
                        return Ok(());
                    }
                    chunk = stream.next() => chunk,
                },
                None => stream.next().await,
            };

            match chunk {
                Some(Ok(bytes)) => {
                    let text = decoder.decode(&bytes);
                    for line in splitter.push(&text) {
                        match accumulator.feed_line(&line) {
                            AccumulatorSignal::Updated => {
                                self.store.update_last_text(accumulator.text());
                            }
                            AccumulatorSignal::Finished => {
                                tracing::debug!(
                                    chars = accumulator.text().len(),
                                    "stream finished"
                                );
                                return Ok(());
                            }
                            AccumulatorSignal::Ignored => {}
                        }
                    }
                }
                Some(Err(e)) => {
                    return Err(StreamError::ConnectionLost {
                        message: e.to_string(),
                    });
                }
                None => break,
            }
        }

        // End-of-stream without [DONE]: flush the trailing unterminated
        // line, then stop. Not an error.
        let tail = decoder.finish();
        let mut lines = splitter.push(&tail);
        lines.extend(splitter.finish());
        for line in lines {
            if accumulator.feed_line(&line) == AccumulatorSignal::Updated {
                self.store.update_last_text(accumulator.text());
            }
        }
        tracing::debug!(
            chars = accumulator.text().len(),
            "stream ended without done sentinel"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::models::UserProfile;
    use crate::session::Session;
    use crate::store::WELCOME_TEXT;
    use bytes::Bytes;

    const STREAM_URL: &str = "http://chat.test/api/stream";

    fn service(http: MockHttpClient) -> ChatService {
        let config = ChatConfig::new().with_chat_base_url("http://chat.test/api");
        ChatService::new(Arc::new(http), SessionHandle::new(), config)
    }

    fn chunks(parts: &[&[u8]]) -> MockResponse {
        MockResponse::Stream(parts.iter().map(|p| Bytes::copy_from_slice(p)).collect())
    }

    #[tokio::test]
    async fn test_simple_stream_accumulates_into_last_message() {
        let http = MockHttpClient::new();
        http.set_response(
            STREAM_URL,
            chunks(&[b"data: Hel", b"lo\n", b"data: [DONE]\n"]),
        );
        let mut service = service(http);

        service.send_stream_message("hi").await.unwrap();

        let store = service.store();
        assert_eq!(store.count(), 3); // welcome + user + assistant
        assert_eq!(store.last().unwrap().text, "Hello");
        assert_eq!(store.last().unwrap().sender, ASSISTANT_SENDER);
    }

    #[tokio::test]
    async fn test_no_updates_after_done() {
        let http = MockHttpClient::new();
        http.set_response(
            STREAM_URL,
            chunks(&[b"data: X\n", b"data: [DONE]\n", b"data: late\n"]),
        );
        let mut service = service(http);

        service.send_stream_message("hi").await.unwrap();
        assert_eq!(service.store().last().unwrap().text, "X");
    }

    #[tokio::test]
    async fn test_multibyte_character_split_across_chunks() {
        let bytes = "data: 你好\n".as_bytes();
        // Split inside 你 (3-byte sequence starting at offset 6).
        let http = MockHttpClient::new();
        http.set_response(
            STREAM_URL,
            chunks(&[&bytes[..7], &bytes[7..], b"data: [DONE]\n"]),
        );
        let mut service = service(http);

        service.send_stream_message("hi").await.unwrap();
        assert_eq!(service.store().last().unwrap().text, "你好");
    }

    #[tokio::test]
    async fn test_lines_without_prefix_are_discarded() {
        let http = MockHttpClient::new();
        http.set_response(
            STREAM_URL,
            chunks(&[b"noise\n", b"data: ok\n", b": comment\n", b"data: [DONE]\n"]),
        );
        let mut service = service(http);

        service.send_stream_message("hi").await.unwrap();
        assert_eq!(service.store().last().unwrap().text, "ok");
    }

    #[tokio::test]
    async fn test_stream_end_without_done_is_not_an_error() {
        let http = MockHttpClient::new();
        http.set_response(STREAM_URL, chunks(&[b"data: partial\n"]));
        let mut service = service(http);

        service.send_stream_message("hi").await.unwrap();

        let store = service.store();
        assert_eq!(store.last().unwrap().text, "partial");
        // No apology message appended.
        assert_eq!(store.count(), 3);
    }

    #[tokio::test]
    async fn test_trailing_unterminated_line_is_flushed() {
        let http = MockHttpClient::new();
        http.set_response(STREAM_URL, chunks(&[b"data: no newline"]));
        let mut service = service(http);

        service.send_stream_message("hi").await.unwrap();
        assert_eq!(service.store().last().unwrap().text, "no newline");
    }

    #[tokio::test]
    async fn test_server_error_appends_fallback_message() {
        let http = MockHttpClient::new();
        http.set_response(
            STREAM_URL,
            MockResponse::Error(HttpError::ServerError {
                status: 500,
                message: "boom".to_string(),
            }),
        );
        let mut service = service(http);

        service.send_stream_message("hi").await.unwrap();

        let store = service.store();
        // welcome + user + apology; no abandoned assistant slot.
        assert_eq!(store.count(), 3);
        assert_eq!(store.last().unwrap().text, FALLBACK_TEXT);
        assert_eq!(store.last().unwrap().sender, ASSISTANT_SENDER);
    }

    #[tokio::test]
    async fn test_mid_read_error_appends_fallback_after_partial() {
        let http = MockHttpClient::new();
        http.set_response(
            STREAM_URL,
            MockResponse::StreamThenError(
                vec![Bytes::from("data: part\n")],
                HttpError::Io("reset".to_string()),
            ),
        );
        let mut service = service(http);

        service.send_stream_message("hi").await.unwrap();

        let store = service.store();
        // welcome + user + partial assistant + apology.
        assert_eq!(store.count(), 4);
        assert_eq!(store.last().unwrap().text, FALLBACK_TEXT);
        assert_eq!(store.messages()[2].text, "part");
    }

    #[tokio::test]
    async fn test_request_carries_identifiers_and_auth() {
        let http = MockHttpClient::new();
        http.set_response(STREAM_URL, chunks(&[b"data: [DONE]\n"]));

        let session = SessionHandle::new();
        session.set(Session::authenticated(
            "logged-in-42",
            UserProfile::from_username("alice"),
        ));
        let config = ChatConfig::new()
            .with_chat_base_url("http://chat.test/api")
            .with_platform("web")
            .with_app("demo");
        let mut service = ChatService::new(Arc::new(http.clone()), session, config);

        service.send_stream_message("question").await.unwrap();

        let request = &http.requests()[0];
        assert_eq!(request.url, STREAM_URL);
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Bearer logged-in-42")
        );
        assert_eq!(request.headers.get("Platform").map(String::as_str), Some("web"));
        assert_eq!(request.headers.get("App").map(String::as_str), Some("demo"));

        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "message": "question",
                "platform": "web",
                "app": "demo",
            })
        );
    }

    #[tokio::test]
    async fn test_unauthenticated_request_has_no_auth_header() {
        let http = MockHttpClient::new();
        http.set_response(STREAM_URL, chunks(&[b"data: [DONE]\n"]));
        let mut service = service(http.clone());

        service.send_stream_message("hi").await.unwrap();
        assert!(!http.requests()[0].headers.contains_key("Authorization"));
    }

    #[tokio::test]
    async fn test_user_message_uses_profile_display_name() {
        let http = MockHttpClient::new();
        http.set_response(STREAM_URL, chunks(&[b"data: [DONE]\n"]));

        let session = SessionHandle::new();
        session.set(Session::authenticated(
            "t",
            UserProfile::from_username("alice"),
        ));
        let config = ChatConfig::new().with_chat_base_url("http://chat.test/api");
        let mut service = ChatService::new(Arc::new(http), session, config);

        service.send_stream_message("hello").await.unwrap();

        let user_msg = &service.store().messages()[1];
        assert_eq!(user_msg.sender, "alice");
        assert!(user_msg.is_own);
    }

    #[tokio::test]
    async fn test_welcome_scenario_counts() {
        let http = MockHttpClient::new();
        http.set_response(
            STREAM_URL,
            chunks(&[b"data: Hel", b"lo\n", b"data: [DONE]\n"]),
        );
        let mut service = service(http);

        assert_eq!(service.store().count(), 1);
        assert_eq!(service.store().messages()[0].text, WELCOME_TEXT);

        service.send_stream_message("hi").await.unwrap();
        assert_eq!(service.store().count(), 3);
        assert_eq!(service.store().last().unwrap().text, "Hello");
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_stops_before_reading() {
        let http = MockHttpClient::new();
        http.set_response(STREAM_URL, chunks(&[b"data: never\n", b"data: [DONE]\n"]));
        let mut service = service(http);

        let (handle, token) = cancel_pair();
        handle.cancel();
        service
            .send_stream_message_cancellable("hi", token)
            .await
            .unwrap();

        // Assistant slot exists but no payload was consumed.
        assert_eq!(service.store().last().unwrap().text, "");
        assert!(!service.is_streaming());
    }

    #[tokio::test]
    async fn test_streaming_flag_resets_after_completion() {
        let http = MockHttpClient::new();
        http.set_response(STREAM_URL, chunks(&[b"data: [DONE]\n"]));
        let mut service = service(http);

        assert!(!service.is_streaming());
        service.send_stream_message("hi").await.unwrap();
        assert!(!service.is_streaming());
    }

    #[tokio::test]
    async fn test_dropped_send_future_releases_streaming_flag() {
        let http = MockHttpClient::new();
        http.set_response(STREAM_URL, MockResponse::StreamPending);
        let mut service = service(http.clone());

        // Caller gives up on a stalled stream by dropping the future.
        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            service.send_stream_message("hi"),
        )
        .await;
        assert!(timed_out.is_err());
        assert!(!service.is_streaming());

        // The service keeps working afterwards.
        http.set_response(STREAM_URL, chunks(&[b"data: ok\n", b"data: [DONE]\n"]));
        service.send_stream_message("again").await.unwrap();
        assert_eq!(service.store().last().unwrap().text, "ok");
    }

    #[tokio::test]
    async fn test_send_rejected_while_stream_active() {
        let http = MockHttpClient::new();
        http.set_response(STREAM_URL, chunks(&[b"data: [DONE]\n"]));
        let mut service = service(http);
        service.streaming.store(true, Ordering::Release);

        let err = service.send_stream_message("hi").await.unwrap_err();
        assert!(matches!(err, ChatError::StreamInProgress));
        // Nothing was appended for the rejected send.
        assert_eq!(service.store().count(), 1);
    }
}
