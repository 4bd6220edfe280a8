//! Conversation log, transcript and the chat submission state machine.
//!
//! The log is what the completion service sees: the system turn followed by
//! every user turn and every assistant reply that actually arrived. The
//! transcript is what the user sees: the same exchange plus provisional
//! bubbles and error bubbles. Failed replies only ever reach the transcript.

use providers::completion::CompletionError;
use shared::agent_api::{ChatMessage, Role};
use thiserror::Error;
use uuid::Uuid;

/// Text shown in a provisional assistant bubble
pub const PENDING_PLACEHOLDER: &str = "Thinking...";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("a reply is still on its way")]
    Busy,
    #[error("nothing to send")]
    Empty,
    #[error("no request is waiting for a reply")]
    NoPending,
    #[error("reply for request #{0} arrived after it was superseded")]
    Stale(u64),
}

/// Ordered history sent with every request. Starts with exactly one system turn.
#[derive(Debug, Clone)]
pub struct ConversationLog {
    turns: Vec<ChatMessage>,
}

impl ConversationLog {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![ChatMessage::system(system_prompt)],
        }
    }

    pub fn turns(&self) -> &[ChatMessage] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    fn push(&mut self, message: ChatMessage) {
        self.turns.push(message);
    }
}

/// Lifecycle of one transcript bubble
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    Pending,
    Resolved(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Bubble {
    pub id: Uuid,
    pub role: Role,
    pub state: TurnState,
    pub timestamp: String,
}

impl Bubble {
    fn new(role: Role, state: TurnState) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            state,
            timestamp: chrono::Local::now().format("%H:%M").to_string(),
        }
    }

    pub fn text(&self) -> &str {
        match &self.state {
            TurnState::Pending => PENDING_PLACEHOLDER,
            TurnState::Resolved(text) | TurnState::Failed(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.state, TurnState::Failed(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    bubbles: Vec<Bubble>,
}

impl Transcript {
    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn last_assistant(&self) -> Option<&Bubble> {
        self.bubbles.iter().rev().find(|b| b.role == Role::Assistant)
    }

    fn push(&mut self, bubble: Bubble) -> Uuid {
        let id = bubble.id;
        self.bubbles.push(bubble);
        id
    }

    fn settle(&mut self, id: Uuid, state: TurnState) -> bool {
        match self.bubbles.iter_mut().find(|b| b.id == id) {
            Some(bubble) => {
                bubble.state = state;
                true
            }
            None => false,
        }
    }
}

/// The request a submission produced; hand `messages` to the completion client
/// and feed the outcome back with the same `seq`.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub seq: u64,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Copy)]
struct PendingTurn {
    seq: u64,
    bubble_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Awaiting { seq: u64 },
}

#[derive(Debug, Clone)]
pub struct ChatPipeline {
    log: ConversationLog,
    transcript: Transcript,
    pending: Option<PendingTurn>,
    last_seq: u64,
}

impl ChatPipeline {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            log: ConversationLog::new(system_prompt),
            transcript: Transcript::default(),
            pending: None,
            last_seq: 0,
        }
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> Phase {
        match self.pending {
            Some(p) => Phase::Awaiting { seq: p.seq },
            None => Phase::Idle,
        }
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        self.pending.is_none()
    }

    /// Record the user turn, add a provisional reply and return the request to send.
    pub fn begin(&mut self, content: &str) -> Result<OutboundRequest, ChatError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ChatError::Empty);
        }
        if self.pending.is_some() {
            return Err(ChatError::Busy);
        }

        self.log.push(ChatMessage::user(content));
        self.transcript
            .push(Bubble::new(Role::User, TurnState::Resolved(content.to_string())));
        let bubble_id = self
            .transcript
            .push(Bubble::new(Role::Assistant, TurnState::Pending));

        self.last_seq += 1;
        self.pending = Some(PendingTurn {
            seq: self.last_seq,
            bubble_id,
        });

        Ok(OutboundRequest {
            seq: self.last_seq,
            messages: self.log.turns().to_vec(),
        })
    }

    /// Settle the provisional reply for request `seq`.
    pub fn complete(
        &mut self,
        seq: u64,
        result: Result<String, CompletionError>,
    ) -> Result<(), ChatError> {
        let pending = self.pending.ok_or(ChatError::NoPending)?;
        if pending.seq != seq {
            tracing::debug!(seq, outstanding = pending.seq, "dropping stale completion");
            return Err(ChatError::Stale(seq));
        }
        self.pending = None;

        match result {
            Ok(reply) => {
                self.transcript
                    .settle(pending.bubble_id, TurnState::Resolved(reply.clone()));
                self.log.push(ChatMessage::assistant(reply));
            }
            Err(e) => {
                tracing::error!(seq, "completion failed: {}", e);
                self.transcript
                    .settle(pending.bubble_id, TurnState::Failed(format!("Error: {}", e)));
            }
        }
        Ok(())
    }

    /// Add an assistant message that did not come from the service.
    pub fn advise(&mut self, text: &str) -> Result<(), ChatError> {
        if self.pending.is_some() {
            return Err(ChatError::Busy);
        }
        self.log.push(ChatMessage::assistant(text));
        self.transcript
            .push(Bubble::new(Role::Assistant, TurnState::Resolved(text.to_string())));
        Ok(())
    }
}
