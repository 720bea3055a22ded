use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ClientError {
    /// Endpoint unset or malformed, detected before any network attempt.
    #[error("{0}")]
    Configuration(String),

    /// Network-level failure or a non-2xx response status.
    #[error("{0}")]
    Transport(String),

    /// Anything else, malformed response bodies included.
    #[error("{0}")]
    Unclassified(String),
}

impl ClientError {
    /// User-facing text for a failed turn. The unset-endpoint case gets a
    /// remediation hint instead of the generic `Error:` format.
    pub fn user_text(&self) -> String {
        match self {
            ClientError::Configuration(msg) if msg.starts_with("No API base URL") => {
                "Please set the API base URL first (run the configure command)".to_string()
            }
            other => format!("Error: {}", other),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Unclassified(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
