//! Contract tests for the portal client, run against a local mock of the
//! backend. These pin the request/response shapes any backend-compatible
//! client must reproduce: exact bodies, header presence, idempotency-key
//! freshness, and the transcript invariants around failure.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aport::{
    AuthClient, ChatClient, ChatRole, ChatThread, DocumentClient, DocumentUpload, FALLBACK_REPLY,
    Portal, Session, SessionStore,
};

fn portal(server: &MockServer) -> Portal {
    Portal::new(Some(server.uri())).unwrap()
}

fn authed_store() -> Arc<SessionStore> {
    let store = SessionStore::in_memory();
    store
        .save(Session::new("tok", "rt", "2027-01-01T00:00:00Z"))
        .unwrap();
    Arc::new(store)
}

fn body_of(request: &wiremock::Request) -> serde_json::Value {
    serde_json::from_slice(&request.body).unwrap()
}

#[tokio::test]
async fn register_posts_exact_body_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({
            "phone": "77771234567",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user_id": "u-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthClient::new(portal(&server));
    let outcome = auth
        .register("+7 (777) 123-45-67", "hunter2")
        .await
        .unwrap();
    assert_eq!(outcome.user_id, "u-1");
}

#[tokio::test]
async fn register_failure_discards_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(422).set_body_string("duplicate phone"))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthClient::new(portal(&server));
    let err = auth.register("77771234567", "hunter2").await.unwrap_err();
    assert_eq!(err.status_code(), Some(422));
    assert!(err.to_string().contains("Registration failed"));
    assert!(!err.to_string().contains("duplicate phone"));
}

#[tokio::test]
async fn login_success_returns_credential_triple() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({
            "phone": "77771234567",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "at",
            "refresh_token": "rt",
            "expires_at": "2027-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthClient::new(portal(&server));
    let outcome = auth.login("77771234567", "hunter2").await.unwrap();
    assert_eq!(outcome.access_token, "at");

    // Login itself persists nothing; the caller hands it to the store.
    let store = SessionStore::in_memory();
    assert!(!store.is_authenticated());
    store.save(outcome.into()).unwrap();
    assert_eq!(store.access_token().as_deref(), Some("at"));
}

#[tokio::test]
async fn login_failure_carries_body_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(403).set_body_string("wrong password"))
        .mount(&server)
        .await;

    let auth = AuthClient::new(portal(&server));
    let err = auth.login("77771234567", "hunter2").await.unwrap_err();
    assert_eq!(err.to_string(), "API error (403): wrong password");
}

#[tokio::test]
async fn login_failure_with_empty_body_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let auth = AuthClient::new(portal(&server));
    let err = auth.login("77771234567", "hunter2").await.unwrap_err();
    assert!(err.to_string().contains("Login failed"));
}

#[tokio::test]
async fn stale_token_surfaces_as_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;

    let documents = DocumentClient::new(portal(&server), authed_store());
    let err = documents.list().await.unwrap_err();
    assert!(err.is_authentication());
    assert_eq!(err.to_string(), "Authentication error: token expired");
}

#[tokio::test]
async fn list_without_token_makes_zero_network_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let documents = DocumentClient::new(portal(&server), Arc::new(SessionStore::in_memory()));
    let err = documents.list().await.unwrap_err();
    assert!(err.is_missing_credential());
    server.verify().await;
}

#[tokio::test]
async fn list_sends_bearer_and_reconciles_both_shapes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/upload"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "d1", "name": "doc.txt", "company_id": "auto", "priority": false},
            {"DocumentID": "srv-9", "DocumentName": "report.pdf", "UserID": "u-1"},
            {"DocumentID": "srv-10"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let documents = DocumentClient::new(portal(&server), authed_store());
    let entries = documents.list().await.unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].display_name(), "doc.txt");
    assert_eq!(entries[1].display_name(), "report.pdf");
    assert_eq!(entries[1].id.as_deref(), Some("srv-9"));
    assert_eq!(entries[2].display_name(), "Untitled");
}

#[tokio::test]
async fn create_mints_a_fresh_request_id_per_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "stored"})))
        .expect(2)
        .mount(&server)
        .await;

    let documents = DocumentClient::new(portal(&server), authed_store());
    let upload = DocumentUpload::from_text("doc.txt", "hello");
    documents.create(upload.clone()).await.unwrap();
    documents.create(upload).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let first = body_of(&requests[0]);
    let second = body_of(&requests[1]);

    // Identical uploads, distinct idempotency keys.
    assert_ne!(first["request_id"], second["request_id"]);
    assert!(!first["request_id"].as_str().unwrap().is_empty());
    assert_eq!(first["document"], "hello");
    assert_eq!(first["name"], "doc.txt");
    assert_eq!(first["company_id"], "auto");
    assert_eq!(first["priority"], false);
    assert_eq!(second["document"], first["document"]);
}

#[tokio::test]
async fn create_then_list_shows_the_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"DocumentID": "srv-1", "DocumentName": "doc.txt"}
        ])))
        .mount(&server)
        .await;

    let documents = DocumentClient::new(portal(&server), authed_store());
    let outcome = documents
        .create(DocumentUpload::from_text("doc.txt", "hello"))
        .await
        .unwrap();
    assert_eq!(outcome.message, None);

    let entries = documents.list().await.unwrap();
    assert!(entries.iter().any(|e| e.display_name() == "doc.txt"));
}

#[tokio::test]
async fn chat_sends_single_message_with_fresh_rquid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "hi"})))
        .expect(2)
        .mount(&server)
        .await;

    let chat = ChatClient::new(portal(&server), authed_store());
    assert_eq!(chat.send("hello").await.unwrap().reply, "hi");
    chat.send("hello").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let first = body_of(&requests[0]);
    let second = body_of(&requests[1]);

    assert_eq!(
        first["messages"],
        json!([{"content": "hello", "role": "user"}])
    );
    assert_ne!(first["rquid"], second["rquid"]);
}

#[tokio::test]
async fn chat_without_token_omits_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "hi"})))
        .expect(1)
        .mount(&server)
        .await;

    let chat = ChatClient::new(portal(&server), Arc::new(SessionStore::in_memory()));
    chat.send("hello").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn transcript_grows_by_two_per_attempt_and_alternates() {
    let server = MockServer::start().await;
    // First send succeeds, the rest fail with a backend error.
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "pong"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let thread = ChatThread::with_greeting(
        ChatClient::new(portal(&server), authed_store()),
        "How can I help?",
    );

    thread.send("ping").await.unwrap();
    let err = thread.send("ping again").await.unwrap_err();
    assert_eq!(err.to_string(), "API error (500): boom");

    let messages = thread.messages();
    // Initial seed plus 2 entries per attempt.
    assert_eq!(messages.len(), 1 + 2 * 2);
    for (i, message) in messages.iter().enumerate() {
        let expected = if i % 2 == 0 {
            ChatRole::Assistant
        } else {
            ChatRole::User
        };
        assert_eq!(message.role, expected);
    }
    assert_eq!(messages[2].content, "pong");
    assert_eq!(messages[4].content, FALLBACK_REPLY);
}

#[tokio::test]
async fn concurrent_send_is_rejected_while_busy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"reply": "slow"}))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let thread = Arc::new(ChatThread::new(ChatClient::new(
        portal(&server),
        authed_store(),
    )));

    let background = {
        let thread = thread.clone();
        tokio::spawn(async move { thread.send("first").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(thread.is_sending());
    let err = thread.send("second").await.unwrap_err();
    assert!(err.is_busy());

    let reply = background.await.unwrap().unwrap();
    assert_eq!(reply, "slow");

    // The rejected attempt left no trace in the transcript.
    let messages = thread.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "first");
    assert!(!thread.is_sending());
}
