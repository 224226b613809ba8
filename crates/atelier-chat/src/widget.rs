//! Chat widget state machine.
//!
//! A submit is split in two halves so a front end can run the relay call
//! wherever it likes:
//!
//! 1. [`ChatWidget::begin_submit`] validates the text, appends the user
//!    message, clears the input and hands out a [`PendingSubmit`] token.
//! 2. [`ChatWidget::finish`] consumes that token with the relay outcome and
//!    appends exactly one assistant message.
//!
//! The widget holds at most one outstanding token, so a second submit while
//! one is in flight is rejected.

use thiserror::Error;
use tracing::{debug, warn};

use atelier_core::{notices, ChatRequest, ChatResponse, Transcript};

use crate::client::RelayTransport;
use crate::error::ClientError;
use crate::signal::AssistantEvent;
use crate::suggestions::{self, SUGGESTED_PROMPTS};

/// Why a submit did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("nothing to send")]
    Empty,

    #[error("a reply is already pending")]
    Busy,

    #[error("no suggestion at index {0}")]
    UnknownSuggestion(usize),
}

/// Claim on the widget's single in-flight slot.
///
/// Not `Clone`: one token can complete one submit.
#[derive(Debug)]
pub struct PendingSubmit {
    token: u64,
    message: String,
}

impl PendingSubmit {
    /// The utterance that was appended to the transcript.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Request body for the relay.
    pub fn request(&self) -> ChatRequest {
        ChatRequest::new(self.message.clone())
    }
}

/// What came back from the relay, reduced to what the widget shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// 2xx response. `None` when the reply was absent or empty.
    Replied(Option<String>),
    /// Network failure, non-2xx status or undecodable body.
    Failed,
}

impl From<Result<ChatResponse, ClientError>> for RelayOutcome {
    fn from(result: Result<ChatResponse, ClientError>) -> Self {
        match result {
            Ok(response) => RelayOutcome::Replied(response.reply_text().map(str::to_string)),
            Err(e) => {
                warn!(error = %e, "Relay call failed");
                RelayOutcome::Failed
            }
        }
    }
}

/// Transcript, input buffer and visibility of one chat widget.
#[derive(Debug, Default)]
pub struct ChatWidget {
    transcript: Transcript,
    input: String,
    in_flight: Option<u64>,
    next_token: u64,
    open: bool,
}

impl ChatWidget {
    /// Create a closed widget with an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// True while a relay call is outstanding.
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn suggestions(&self) -> &'static [&'static str] {
        &SUGGESTED_PROMPTS
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the widget. A pending reply still lands in the transcript.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn apply_signal(&mut self, event: AssistantEvent) {
        match event {
            AssistantEvent::Open => self.open(),
        }
    }

    /// Start a submit: append the user message, clear the input and claim
    /// the in-flight slot.
    ///
    /// Whitespace only decides emptiness; a non-empty `text` is stored and
    /// sent exactly as given.
    pub fn begin_submit(&mut self, text: &str) -> Result<PendingSubmit, SubmitRejected> {
        if text.trim().is_empty() {
            return Err(SubmitRejected::Empty);
        }
        if self.in_flight.is_some() {
            debug!("Submit ignored while a reply is pending");
            return Err(SubmitRejected::Busy);
        }

        let token = self.next_token;
        self.next_token = self.next_token.wrapping_add(1);
        self.in_flight = Some(token);

        self.transcript.push_user(text);
        self.input.clear();

        Ok(PendingSubmit {
            token,
            message: text.to_string(),
        })
    }

    /// Complete a submit with the relay outcome.
    ///
    /// Appends one assistant message and frees the slot. Returns `false` and
    /// changes nothing if `pending` is not the outstanding token.
    pub fn finish(&mut self, pending: PendingSubmit, outcome: RelayOutcome) -> bool {
        if self.in_flight != Some(pending.token) {
            debug!(token = pending.token, "Ignoring stale relay completion");
            return false;
        }
        self.in_flight = None;

        let reply = match outcome {
            RelayOutcome::Replied(Some(text)) if !text.is_empty() => text,
            RelayOutcome::Replied(_) => notices::WIDGET_EMPTY_REPLY.to_string(),
            RelayOutcome::Failed => notices::WIDGET_RELAY_FAILURE.to_string(),
        };
        self.transcript.push_assistant(reply);
        true
    }

    /// Submit `text` and wait for the reply.
    pub async fn submit(
        &mut self,
        text: &str,
        transport: &dyn RelayTransport,
    ) -> Result<(), SubmitRejected> {
        let pending = self.begin_submit(text)?;
        let outcome = RelayOutcome::from(transport.send(&pending.request()).await);
        self.finish(pending, outcome);
        Ok(())
    }

    /// Submit whatever is in the input buffer.
    pub async fn submit_input(
        &mut self,
        transport: &dyn RelayTransport,
    ) -> Result<(), SubmitRejected> {
        let text = self.input.clone();
        self.submit(&text, transport).await
    }

    /// Submit one of the suggested prompts.
    pub async fn submit_suggestion(
        &mut self,
        index: usize,
        transport: &dyn RelayTransport,
    ) -> Result<(), SubmitRejected> {
        let prompt =
            suggestions::suggestion(index).ok_or(SubmitRejected::UnknownSuggestion(index))?;
        self.submit(prompt, transport).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use atelier_core::ChatRole;

    /// Transport that answers from a fixed script and records requests.
    struct FakeTransport {
        answer: fn() -> Result<ChatResponse, ClientError>,
        sent: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        fn new(answer: fn() -> Result<ChatResponse, ClientError>) -> Self {
            Self {
                answer,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RelayTransport for FakeTransport {
        async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
            self.sent.lock().unwrap().push(request.message.clone());
            (self.answer)()
        }
    }

    fn founders() -> Result<ChatResponse, ClientError> {
        Ok(ChatResponse::reply("Uday Sood and Vishal Baibhav Panda."))
    }

    fn server_error() -> Result<ChatResponse, ClientError> {
        Err(ClientError::Status {
            status: 500,
            message: notices::UPSTREAM_ERROR.to_string(),
        })
    }

    fn empty_reply() -> Result<ChatResponse, ClientError> {
        Ok(ChatResponse::Reply { reply: None })
    }

    #[tokio::test]
    async fn test_founders_question() {
        let transport = FakeTransport::new(founders);
        let mut widget = ChatWidget::new();

        widget
            .submit("Who are the founders?", &transport)
            .await
            .unwrap();

        let messages = widget.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].same_as(ChatRole::User, "Who are the founders?"));
        assert!(messages[1].same_as(ChatRole::Assistant, "Uday Sood and Vishal Baibhav Panda."));
        assert!(!widget.is_pending());
        assert_eq!(transport.sent(), vec!["Who are the founders?"]);
    }

    #[tokio::test]
    async fn test_whitespace_is_noop() {
        let transport = FakeTransport::new(founders);
        let mut widget = ChatWidget::new();
        widget.set_input("   ");

        let result = widget.submit_input(&transport).await;

        assert_eq!(result, Err(SubmitRejected::Empty));
        assert!(widget.transcript().is_empty());
        assert_eq!(widget.input(), "   ");
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_failure_appends_single_fallback() {
        let transport = FakeTransport::new(server_error);
        let mut widget = ChatWidget::new();

        widget.submit("hello", &transport).await.unwrap();

        let messages = widget.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[1].same_as(ChatRole::Assistant, notices::WIDGET_RELAY_FAILURE));
        assert!(!messages[1].content.contains("AI API error"));
        assert!(!widget.is_pending());
    }

    #[tokio::test]
    async fn test_empty_reply_uses_fallback() {
        let transport = FakeTransport::new(empty_reply);
        let mut widget = ChatWidget::new();

        widget.submit("hello", &transport).await.unwrap();

        assert!(widget
            .transcript()
            .last()
            .unwrap()
            .same_as(ChatRole::Assistant, notices::WIDGET_EMPTY_REPLY));
    }

    #[tokio::test]
    async fn test_input_is_sent_verbatim_and_cleared() {
        let transport = FakeTransport::new(founders);
        let mut widget = ChatWidget::new();
        for c in "  hi there ".chars() {
            widget.push_char(c);
        }

        widget.submit_input(&transport).await.unwrap();

        assert_eq!(widget.input(), "");
        assert_eq!(transport.sent(), vec!["  hi there "]);
        assert!(widget.transcript().messages()[0].same_as(ChatRole::User, "  hi there "));
    }

    #[tokio::test]
    async fn test_surrounding_whitespace_is_kept() {
        let transport = FakeTransport::new(founders);
        let mut widget = ChatWidget::new();

        widget
            .submit("  Who are the founders?\n", &transport)
            .await
            .unwrap();

        assert_eq!(transport.sent(), vec!["  Who are the founders?\n"]);
        assert!(widget.transcript().messages()[0]
            .same_as(ChatRole::User, "  Who are the founders?\n"));
    }

    #[test]
    fn test_second_submit_while_pending_is_rejected() {
        let mut widget = ChatWidget::new();
        let pending = widget.begin_submit("first").unwrap();
        assert!(widget.is_pending());

        widget.set_input("second");
        assert_eq!(
            widget.begin_submit("second").unwrap_err(),
            SubmitRejected::Busy
        );
        assert_eq!(widget.transcript().len(), 1);
        assert_eq!(widget.input(), "second");

        assert!(widget.finish(pending, RelayOutcome::Replied(Some("ok".into()))));
        assert_eq!(widget.transcript().len(), 2);
        assert!(widget.begin_submit("second").is_ok());
    }

    #[test]
    fn test_stale_token_is_ignored() {
        let mut widget = ChatWidget::new();
        let first = widget.begin_submit("first").unwrap();
        widget.finish(first, RelayOutcome::Failed);

        let second = widget.begin_submit("second").unwrap();
        let forged = PendingSubmit {
            token: second.token.wrapping_add(7),
            message: "second".into(),
        };

        assert!(!widget.finish(forged, RelayOutcome::Replied(Some("late".into()))));
        assert!(widget.is_pending());
        assert_eq!(widget.transcript().len(), 3);

        assert!(widget.finish(second, RelayOutcome::Replied(None)));
        assert_eq!(widget.transcript().count(ChatRole::Assistant), 2);
    }

    #[tokio::test]
    async fn test_suggestion_goes_through_guard() {
        let transport = FakeTransport::new(founders);
        let mut widget = ChatWidget::new();

        widget.submit_suggestion(0, &transport).await.unwrap();
        assert_eq!(transport.sent(), vec!["Who are the founders?"]);

        let err = widget.submit_suggestion(99, &transport).await.unwrap_err();
        assert_eq!(err, SubmitRejected::UnknownSuggestion(99));
        assert_eq!(widget.transcript().len(), 2);
    }

    #[test]
    fn test_visibility() {
        let mut widget = ChatWidget::new();
        assert!(!widget.is_open());

        widget.apply_signal(AssistantEvent::Open);
        assert!(widget.is_open());

        widget.close();
        assert!(!widget.is_open());

        widget.toggle();
        assert!(widget.is_open());
    }

    #[test]
    fn test_close_does_not_drop_pending_reply() {
        let mut widget = ChatWidget::new();
        widget.open();
        let pending = widget.begin_submit("hello").unwrap();
        widget.close();

        assert!(widget.finish(pending, RelayOutcome::Replied(Some("hi".into()))));
        assert_eq!(widget.transcript().len(), 2);
    }
}
