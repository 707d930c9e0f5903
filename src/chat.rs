//! Chat session — ordered message history over the retrieval pipeline.
//!
//! One turn = append the customer message, retrieve matching knowledge,
//! compose the prompt, call the provider, append the reply. A provider
//! failure never reaches the caller: the session appends a fixed apology
//! instead and logs the error. History is append-only and ordered by
//! insertion; nothing is edited, deleted, or retried. `reset` (logout)
//! discards everything.
//!
//! The session does not enforce mutual exclusion between overlapping sends;
//! the console serializes turns naturally. [`state`](ChatSession::state)
//! exposes idle/awaiting so a surface can disable input mid-turn.

use tracing::{debug, error};

use crate::knowledge::{Category, KnowledgeStore};
use crate::llm::LlmProvider;
use crate::prompt;

/// Reply substituted when the provider fails, verbatim.
pub const FALLBACK_REPLY: &str =
    "I apologize, but I'm having trouble responding right now. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingResponse,
}

/// A single message in the session transcript. Session-scoped only — never
/// persisted.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Sequential id, starting at 1.
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    /// RFC 3339 timestamp of insertion.
    pub timestamp: String,
    pub category: Option<Category>,
    /// Marks an in-flight placeholder; real messages are never typing.
    pub typing: bool,
}

pub struct ChatSession {
    provider: LlmProvider,
    history: Vec<ChatMessage>,
    next_id: u64,
    state: SessionState,
}

impl ChatSession {
    pub fn new(provider: LlmProvider) -> Self {
        Self {
            provider,
            history: Vec::new(),
            next_id: 1,
            state: SessionState::Idle,
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run one customer turn and return the assistant's reply message.
    ///
    /// The user message lands in history before any async work; whatever
    /// happens afterwards, it stays at its position unmodified.
    pub async fn send_user_message(
        &mut self,
        store: &KnowledgeStore,
        text: &str,
    ) -> &ChatMessage {
        self.push(text.to_string(), Sender::User);
        self.state = SessionState::AwaitingResponse;

        let matched = store.search(text);
        debug!(matches = matched.len(), "knowledge retrieved for turn");
        let full_prompt = prompt::compose(text, &matched);

        let reply = match self.provider.complete(&full_prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "completion failed — substituting fallback reply");
                FALLBACK_REPLY.to_string()
            }
        };

        self.push(reply, Sender::Assistant);
        self.state = SessionState::Idle;
        self.history.last().expect("reply just appended")
    }

    /// Discard the transcript entirely (logout / session close).
    pub fn reset(&mut self) {
        self.history.clear();
        self.next_id = 1;
        self.state = SessionState::Idle;
    }

    fn push(&mut self, text: String, sender: Sender) {
        self.history.push(ChatMessage {
            id: self.next_id,
            text,
            sender,
            timestamp: crate::knowledge::now_iso8601(),
            category: Some(Category::General),
            typing: false,
        });
        self.next_id += 1;
    }
}
