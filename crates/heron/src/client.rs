use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::errors::ClientError;
use crate::models::chart::ChartDescriptor;
use crate::models::message::Message;
use crate::store::endpoint::EndpointStore;
use crate::store::session::SessionStore;

/// Fixed role label sent with every request. This client does not implement
/// per-user auth; the remote agent only distinguishes roles.
pub const AUTH_ROLE: &str = "manager";

/// Reply text when a response carries neither `error` nor `final_output`.
pub const FALLBACK_REPLY: &str = "I received your message but didn't get a proper response.";

/// Response body of the `/call_agent` exchange. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentResponse {
    pub final_output: Option<String>,
    pub error: Option<String>,
    pub plots: Option<ChartDescriptor>,
    pub encoded_image: Option<String>,
    pub agent_forms: Option<Map<String, Value>>,
}

impl AgentResponse {
    /// Collapse a response into the reply the controller appends to the log.
    /// `error` wins over `final_output`, which wins over the fixed fallback;
    /// empty strings count as absent.
    pub fn into_reply(self) -> BotReply {
        let text = self
            .error
            .filter(|s| !s.is_empty())
            .or(self.final_output.filter(|s| !s.is_empty()))
            .unwrap_or_else(|| FALLBACK_REPLY.to_string());

        BotReply {
            text,
            plots: self.plots,
            encoded_image: self.encoded_image,
        }
    }
}

/// What one settled turn contributes to the log: text plus optional chart
/// and image payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct BotReply {
    pub text: String,
    pub plots: Option<ChartDescriptor>,
    pub encoded_image: Option<String>,
}

impl BotReply {
    pub fn from_error(err: &ClientError) -> Self {
        BotReply {
            text: err.user_text(),
            plots: None,
            encoded_image: None,
        }
    }
}

/// Protocol client for the remote agent. Formats one request per user turn,
/// issues it, and classifies the outcome. No retries, no timeout, no
/// cancellation; at most one request is in flight per turn.
pub struct AgentClient {
    http: reqwest::Client,
    endpoint: EndpointStore,
    session: SessionStore,
}

impl AgentClient {
    pub fn new(endpoint: EndpointStore, session: SessionStore) -> Self {
        AgentClient {
            http: reqwest::Client::new(),
            endpoint,
            session,
        }
    }

    /// Issue one best-effort turn. Failures are folded into the reply text,
    /// so a bad endpoint or a dead network never aborts the conversation.
    pub async fn reply(
        &self,
        question: &str,
        history: &[Message],
        forms: &Map<String, Value>,
    ) -> BotReply {
        match self.send(question, history, forms).await {
            Ok(response) => response.into_reply(),
            Err(err) => {
                tracing::warn!("agent call failed: {}", err);
                BotReply::from_error(&err)
            }
        }
    }

    /// Send the current turn together with the prior history and the agent
    /// form-state blob. A response carrying `agent_forms` replaces the
    /// persisted blob before this returns.
    pub async fn send(
        &self,
        question: &str,
        history: &[Message],
        forms: &Map<String, Value>,
    ) -> Result<AgentResponse, ClientError> {
        let endpoint = self.resolve_endpoint()?;

        let chat_history: Vec<Value> = history
            .iter()
            .filter(|m| !m.is_loading)
            .map(|m| {
                let role = if m.is_user { "user" } else { "assistant" };
                json!({"role": role, "content": m.text})
            })
            .collect();

        let payload = json!({
            "question": question,
            "authRole": AUTH_ROLE,
            "chatHistory": chat_history,
            "agent_forms": forms,
        });

        let response = self
            .http
            .post(format!("{}/call_agent", endpoint))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Transport(format!(
                "API request failed with status {}",
                status.as_u16()
            )));
        }

        let data: AgentResponse = response.json().await?;

        if let Some(agent_forms) = &data.agent_forms {
            if let Err(e) = self.session.save_forms(agent_forms) {
                tracing::warn!("failed to persist agent form state: {}", e);
            }
        }

        Ok(data)
    }

    /// Read the configured endpoint, normalizing the way the request path is
    /// built. Both checks run before any network attempt.
    fn resolve_endpoint(&self) -> Result<String, ClientError> {
        let mut endpoint = self
            .endpoint
            .get()
            .unwrap_or_default()
            .trim()
            .to_string();
        if endpoint.ends_with('/') {
            endpoint.pop();
        }

        if endpoint.is_empty() {
            return Err(ClientError::Configuration(
                "No API base URL configured".to_string(),
            ));
        }
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ClientError::Configuration(
                "Invalid URL - must start with http:// or https://".to_string(),
            ));
        }

        Ok(endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::local::LocalStore;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_in(dir: &tempfile::TempDir) -> AgentClient {
        let store = LocalStore::new(dir.path().to_path_buf());
        AgentClient::new(
            EndpointStore::new(store.clone()),
            SessionStore::new(store),
        )
    }

    async fn client_against(dir: &tempfile::TempDir, server: &MockServer) -> AgentClient {
        let client = client_in(dir);
        client.endpoint.set(&server.uri()).unwrap();
        client
    }

    #[tokio::test]
    async fn test_send_with_no_endpoint_makes_no_request() {
        let dir = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        // Endpoint store left unset on purpose.
        let client = client_in(&dir);
        let err = client.send("hi", &[], &Map::new()).await.unwrap_err();

        assert!(matches!(err, ClientError::Configuration(_)));
        assert_eq!(err.to_string(), "No API base URL configured");
        server.verify().await;
    }

    #[tokio::test]
    async fn test_send_rejects_non_http_scheme_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_in(&dir);
        client.endpoint.set("ftp://x").unwrap();

        let err = client.send("hi", &[], &Map::new()).await.unwrap_err();

        assert!(matches!(err, ClientError::Configuration(_)));
        assert_eq!(
            err.to_string(),
            "Invalid URL - must start with http:// or https://"
        );
    }

    #[tokio::test]
    async fn test_send_posts_question_role_and_history() {
        let dir = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/call_agent"))
            .and(body_partial_json(json!({
                "question": "and now?",
                "authRole": "manager",
                "chatHistory": [
                    {"role": "assistant", "content": "Hello! How can I help you today?"},
                    {"role": "user", "content": "hi"},
                ],
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"final_output": "done"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_against(&dir, &server).await;
        let history = vec![Message::seed(), Message::user("hi")];
        let response = client.send("and now?", &history, &Map::new()).await.unwrap();

        assert_eq!(response.final_output.as_deref(), Some("done"));
    }

    #[tokio::test]
    async fn test_send_excludes_placeholders_from_history() {
        let dir = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "chatHistory": [{"role": "user", "content": "hi"}],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_against(&dir, &server).await;
        let history = vec![Message::user("hi"), Message::placeholder()];
        client.send("next", &history, &Map::new()).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_2xx_status_is_a_transport_error() {
        let dir = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_against(&dir, &server).await;
        let err = client.send("hi", &[], &Map::new()).await.unwrap_err();

        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(err.to_string(), "API request failed with status 500");
    }

    #[tokio::test]
    async fn test_malformed_body_is_unclassified() {
        let dir = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_against(&dir, &server).await;
        let err = client.send("hi", &[], &Map::new()).await.unwrap_err();

        assert!(matches!(err, ClientError::Unclassified(_)));
    }

    #[tokio::test]
    async fn test_response_forms_replace_the_stored_blob() {
        let dir = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "final_output": "noted",
                "agent_forms": {"ticket": {"priority": "high"}},
            })))
            .mount(&server)
            .await;

        let client = client_against(&dir, &server).await;
        let mut stale = Map::new();
        stale.insert("old".to_string(), json!(true));
        client.session.save_forms(&stale).unwrap();

        client.send("hi", &[], &stale).await.unwrap();

        let stored = client.session.load_forms();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored["ticket"], json!({"priority": "high"}));
    }

    #[tokio::test]
    async fn test_reply_folds_failures_into_text() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_in(&dir);

        let reply = client.reply("hi", &[], &Map::new()).await;

        assert_eq!(
            reply.text,
            "Please set the API base URL first (run the configure command)"
        );
        assert!(reply.plots.is_none());
    }

    #[test]
    fn test_reply_precedence_error_over_output_over_fallback() {
        let response = AgentResponse {
            final_output: Some("ok".to_string()),
            error: Some("boom".to_string()),
            ..Default::default()
        };
        assert_eq!(response.into_reply().text, "boom");

        let response = AgentResponse {
            final_output: Some("ok".to_string()),
            ..Default::default()
        };
        assert_eq!(response.into_reply().text, "ok");

        let response = AgentResponse::default();
        assert_eq!(response.into_reply().text, FALLBACK_REPLY);

        // Empty strings count as absent, matching the observed behavior.
        let response = AgentResponse {
            error: Some(String::new()),
            final_output: Some("ok".to_string()),
            ..Default::default()
        };
        assert_eq!(response.into_reply().text, "ok");
    }

    #[tokio::test]
    async fn test_reply_carries_plots_and_image() {
        let dir = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "final_output": "hi",
                "plots": {"type": "bar", "data": [{"name": "A", "value": 1}]},
                "encoded_image": "data:image/png;base64,aGk=",
            })))
            .mount(&server)
            .await;

        let client = client_against(&dir, &server).await;
        let reply = client.reply("chart please", &[], &Map::new()).await;

        assert_eq!(reply.text, "hi");
        assert!(matches!(
            reply.plots,
            Some(ChartDescriptor::Bar { ref data }) if data.len() == 1
        ));
        assert!(reply.encoded_image.is_some());
    }
}
