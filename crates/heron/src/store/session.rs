use anyhow::Result;
use serde_json::{Map, Value};

use crate::models::message::Message;
use crate::store::local::LocalStore;

pub const CHAT_STORAGE_KEY: &str = "chatbot_history";
pub const FORM_DETAILS_KEY: &str = "form_details";

/// Persisted conversation state: the ordered message log plus the opaque
/// agent form-state blob the remote agent round-trips across turns.
///
/// Loads fail soft. Missing or unreadable state degrades to the seed
/// conversation rather than surfacing an error to the user.
#[derive(Debug, Clone)]
pub struct SessionStore {
    store: LocalStore,
}

impl SessionStore {
    pub fn new(store: LocalStore) -> Self {
        SessionStore { store }
    }

    /// Load the message log, seeding a fresh conversation when no prior
    /// state exists or the stored state cannot be parsed.
    pub fn load(&self) -> Vec<Message> {
        match self.store.read(CHAT_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Message>>(&raw) {
                Ok(messages) if !messages.is_empty() => messages,
                Ok(_) => vec![Message::seed()],
                Err(e) => {
                    tracing::warn!("discarding unreadable chat history: {}", e);
                    vec![Message::seed()]
                }
            },
            Ok(None) => vec![Message::seed()],
            Err(e) => {
                tracing::warn!("failed to read chat history: {}", e);
                vec![Message::seed()]
            }
        }
    }

    /// Persist the log. Loading placeholders are transient display state and
    /// are filtered out, so a log never round-trips with `isLoading` set.
    pub fn save(&self, messages: &[Message]) -> Result<()> {
        let finalized: Vec<&Message> = messages.iter().filter(|m| !m.is_loading).collect();
        let raw = serde_json::to_string(&finalized)?;
        self.store.write(CHAT_STORAGE_KEY, &raw)
    }

    /// Remove both the conversation and the agent form state.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(CHAT_STORAGE_KEY)?;
        self.store.remove(FORM_DETAILS_KEY)?;
        Ok(())
    }

    /// Load the agent form-state blob, empty when absent or unreadable.
    pub fn load_forms(&self) -> Map<String, Value> {
        match self.store.read(FORM_DETAILS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(forms) => forms,
                Err(e) => {
                    tracing::warn!("discarding unreadable form state: {}", e);
                    Map::new()
                }
            },
            Ok(None) => Map::new(),
            Err(e) => {
                tracing::warn!("failed to read form state: {}", e);
                Map::new()
            }
        }
    }

    /// Replace the stored form state wholesale. The blob is owned by the
    /// remote agent; this client never merges into it.
    pub fn save_forms(&self, forms: &Map<String, Value>) -> Result<()> {
        let raw = serde_json::to_string(forms)?;
        self.store.write(FORM_DETAILS_KEY, &raw)
    }
}
