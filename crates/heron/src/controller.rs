use serde_json::{Map, Value};

use crate::client::{AgentClient, BotReply};
use crate::models::message::Message;
use crate::store::session::SessionStore;

/// Where the conversation is in its turn cycle. There is at most one
/// outstanding turn; submissions while awaiting are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingResponse,
}

/// A submitted turn waiting to settle: the question, the history snapshot
/// taken before the turn was appended, and the generation it belongs to.
#[derive(Debug)]
pub struct PendingTurn {
    question: String,
    history: Vec<Message>,
    generation: u64,
}

impl PendingTurn {
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The log as it stood before this turn, placeholders excluded by the
    /// client when it builds the request history.
    pub fn history(&self) -> &[Message] {
        &self.history
    }
}

/// Orchestrates turn-taking over the persisted log: appends the user message
/// and the loading placeholder, hands the turn to the protocol client, and
/// reconciles the settlement back into the store.
pub struct Conversation {
    store: SessionStore,
    messages: Vec<Message>,
    state: TurnState,
    generation: u64,
}

impl Conversation {
    /// Load-or-seed init; the store supplies the seed message when no prior
    /// conversation exists.
    pub fn new(store: SessionStore) -> Self {
        let messages = store.load();
        Conversation {
            store,
            messages,
            state: TurnState::Idle,
            generation: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Begin a turn. Blank input and submissions while a turn is already in
    /// flight are rejected without touching the log.
    pub fn submit(&mut self, input: &str) -> Option<PendingTurn> {
        let question = input.trim();
        if question.is_empty() || self.state == TurnState::AwaitingResponse {
            return None;
        }

        let history = self.messages.clone();
        self.messages.push(Message::user(question));
        self.messages.push(Message::placeholder());
        self.persist();
        self.state = TurnState::AwaitingResponse;

        Some(PendingTurn {
            question: question.to_string(),
            history,
            generation: self.generation,
        })
    }

    /// Reconcile a settled turn: the placeholder goes, and the agent message
    /// is appended unless the conversation was cleared while the request was
    /// in flight (generation mismatch). Always lands back in Idle.
    pub fn settle(&mut self, turn: PendingTurn, reply: BotReply) -> Option<&Message> {
        self.messages.retain(|m| !m.is_loading);
        self.state = TurnState::Idle;

        if turn.generation != self.generation {
            tracing::debug!("discarding settlement from a cleared conversation");
            return None;
        }

        let mut message = Message::assistant(&reply.text);
        if let Some(plots) = reply.plots {
            message = message.with_plots(plots);
        }
        if let Some(image) = reply.encoded_image {
            message = message.with_encoded_image(image);
        }
        self.messages.push(message);
        self.persist();
        self.messages.last()
    }

    /// Reset the log to the seed message and erase the agent form state.
    /// Does not cancel an in-flight request; bumping the generation makes
    /// its eventual settlement a no-op instead. Confirmation is the caller's
    /// responsibility.
    pub fn clear_history(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("failed to clear stored history: {}", e);
        }
        self.messages = vec![Message::seed()];
        self.generation += 1;
    }

    pub fn load_forms(&self) -> Map<String, Value> {
        self.store.load_forms()
    }

    /// Drive one full turn against the client. Returns the appended agent
    /// message, or None when the submission was rejected or the settlement
    /// discarded.
    pub async fn run_turn(&mut self, client: &AgentClient, input: &str) -> Option<&Message> {
        let turn = self.submit(input)?;
        let forms = self.store.load_forms();
        let reply = client.reply(turn.question(), turn.history(), &forms).await;
        self.settle(turn, reply)
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.messages) {
            tracing::warn!("failed to persist chat history: {}", e);
        }
    }
}
