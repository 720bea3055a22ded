use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::chart::ChartDescriptor;

/// Greeting shown as the only message of a fresh conversation.
pub const GREETING: &str = "Hello! How can I help you today?";

/// One turn in the conversation log.
///
/// Finalized messages are never edited in place; the only removal the log
/// sees is dropping the transient loading placeholder once a turn settles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Time-derived id, unique within the log. Placeholder ids carry a
    /// `loading-` prefix so they can never collide with finalized entries.
    pub id: String,
    pub text: String,
    pub is_user: bool,
    #[serde(default)]
    pub is_loading: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plots: Option<ChartDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoded_image: Option<String>,
}

impl Message {
    /// Create a finalized user message with the current timestamp
    pub fn user<S: Into<String>>(text: S) -> Self {
        let now = Utc::now();
        Message {
            id: now.timestamp_millis().to_string(),
            text: text.into(),
            is_user: true,
            is_loading: false,
            timestamp: now,
            plots: None,
            encoded_image: None,
        }
    }

    /// Create a finalized agent message with the current timestamp
    pub fn assistant<S: Into<String>>(text: S) -> Self {
        let now = Utc::now();
        Message {
            id: now.timestamp_millis().to_string(),
            text: text.into(),
            is_user: false,
            is_loading: false,
            timestamp: now,
            plots: None,
            encoded_image: None,
        }
    }

    /// Create the transient placeholder shown while a turn is in flight
    pub fn placeholder() -> Self {
        let now = Utc::now();
        Message {
            id: format!("loading-{}", now.timestamp_millis()),
            text: String::new(),
            is_user: false,
            is_loading: true,
            timestamp: now,
            plots: None,
            encoded_image: None,
        }
    }

    /// The single bot message a fresh (or reset) conversation starts with
    pub fn seed() -> Self {
        let mut message = Message::assistant(GREETING);
        message.id = "1".to_string();
        message
    }

    /// Attach a chart descriptor to the message
    pub fn with_plots(mut self, plots: ChartDescriptor) -> Self {
        self.plots = Some(plots);
        self
    }

    /// Attach an inline-encoded image to the message
    pub fn with_encoded_image<S: Into<String>>(mut self, data: S) -> Self {
        self.encoded_image = Some(data.into());
        self
    }
}
