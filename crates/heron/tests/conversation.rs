use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use heron::client::{AgentClient, FALLBACK_REPLY};
use heron::controller::Conversation;
use heron::models::chart::ChartDescriptor;
use heron::models::message::GREETING;
use heron::store::endpoint::EndpointStore;
use heron::store::local::LocalStore;
use heron::store::session::SessionStore;

fn harness(dir: &tempfile::TempDir) -> (Conversation, AgentClient, EndpointStore) {
    let store = LocalStore::new(dir.path().to_path_buf());
    let endpoint = EndpointStore::new(store.clone());
    let conversation = Conversation::new(SessionStore::new(store.clone()));
    let client = AgentClient::new(endpoint.clone(), SessionStore::new(store));
    (conversation, client, endpoint)
}

#[tokio::test]
async fn test_turn_against_live_endpoint_lands_in_the_log() {
    let dir = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/call_agent"))
        .and(body_partial_json(json!({
            "question": "how many open tasks?",
            "authRole": "manager",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "final_output": "hi",
            "plots": {"type": "bar", "data": [{"name": "A", "value": 1}]},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut conversation, client, endpoint) = harness(&dir);
    endpoint.set(&server.uri()).unwrap();

    let settled = conversation
        .run_turn(&client, "how many open tasks?")
        .await
        .unwrap();

    assert_eq!(settled.text, "hi");
    assert!(matches!(
        settled.plots,
        Some(ChartDescriptor::Bar { ref data }) if data.len() == 1
    ));

    let messages = conversation.messages();
    assert_eq!(messages.len(), 3);
    assert!(messages.iter().all(|m| !m.is_loading));
}

#[tokio::test]
async fn test_empty_response_yields_the_fallback_text() {
    let dir = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let (mut conversation, client, endpoint) = harness(&dir);
    endpoint.set(&server.uri()).unwrap();

    let settled = conversation.run_turn(&client, "anyone there?").await.unwrap();

    assert_eq!(settled.text, FALLBACK_REPLY);
}

#[tokio::test]
async fn test_unconfigured_endpoint_still_settles_the_turn() {
    let dir = tempfile::tempdir().unwrap();
    let (mut conversation, client, _endpoint) = harness(&dir);

    let settled = conversation.run_turn(&client, "hello").await.unwrap();

    assert_eq!(
        settled.text,
        "Please set the API base URL first (run the configure command)"
    );
    assert_eq!(conversation.messages().len(), 3);
}

#[tokio::test]
async fn test_form_state_round_trips_across_turns() {
    let dir = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;

    // First turn hands back a form blob; the second turn must echo it.
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"question": "start a ticket"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "final_output": "started",
            "agent_forms": {"ticket": {"priority": "high"}},
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "question": "continue",
            "agent_forms": {"ticket": {"priority": "high"}},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "final_output": "continued",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut conversation, client, endpoint) = harness(&dir);
    endpoint.set(&server.uri()).unwrap();

    conversation.run_turn(&client, "start a ticket").await.unwrap();
    let settled = conversation.run_turn(&client, "continue").await.unwrap();

    assert_eq!(settled.text, "continued");
}

#[tokio::test]
async fn test_clear_resets_the_persisted_conversation() {
    let dir = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"final_output": "ok"})))
        .mount(&server)
        .await;

    let (mut conversation, client, endpoint) = harness(&dir);
    endpoint.set(&server.uri()).unwrap();

    conversation.run_turn(&client, "remember this").await.unwrap();
    conversation.clear_history();

    // A fresh load from the same directory sees only the seed.
    let store = SessionStore::new(LocalStore::new(dir.path().to_path_buf()));
    let reloaded = store.load();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].text, GREETING);
    assert!(store.load_forms().is_empty());
}
