use super::*;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode as HttpStatus},
    routing::post,
    Json, Router,
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct CaptureState {
    requests: Arc<Mutex<Vec<(Option<String>, EmailMessage)>>>,
    reject: bool,
}

async fn capture_email(
    State(state): State<CaptureState>,
    headers: HeaderMap,
    Json(message): Json<EmailMessage>,
) -> (HttpStatus, Json<serde_json::Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state.requests.lock().await.push((auth, message));
    if state.reject {
        (
            HttpStatus::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "message": "domain not verified" })),
        )
    } else {
        (HttpStatus::OK, Json(serde_json::json!({ "id": "email_123" })))
    }
}

async fn spawn_email_api(reject: bool) -> (String, CaptureState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = CaptureState {
        reject,
        ..CaptureState::default()
    };
    let app = Router::new()
        .route("/emails", post(capture_email))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

fn message() -> EmailMessage {
    EmailMessage {
        from: "Launch <notify@launch.test>".to_string(),
        to: "visitor@example.com".to_string(),
        subject: "Welcome".to_string(),
        html: "<p>hi</p>".to_string(),
    }
}

#[test]
fn endpoint_appends_emails_path() {
    let client = ResendClient::new("https://api.resend.com", None).expect("client");
    assert_eq!(client.endpoint().as_str(), "https://api.resend.com/emails");

    let nested = ResendClient::new("http://localhost:9000/v1", None).expect("client");
    assert_eq!(nested.endpoint().as_str(), "http://localhost:9000/v1/emails");
}

#[test]
fn rejects_unparseable_base_url() {
    let err = ResendClient::new("not a url", None)
        .err()
        .expect("should fail");
    assert!(matches!(err, MailerError::InvalidBaseUrl { .. }));
}

#[tokio::test]
async fn missing_api_key_fails_at_send_time() {
    let client = ResendClient::new(DEFAULT_RESEND_BASE_URL, Some("   ".to_string())).expect("client");
    let err = client.send(&message()).await.expect_err("should fail");
    assert!(matches!(err, MailerError::MissingApiKey));
}

#[tokio::test]
async fn send_posts_message_with_bearer_token() {
    let (base_url, state) = spawn_email_api(false).await;
    let client = ResendClient::new(&base_url, Some("re_test".to_string())).expect("client");

    let sent = client.send(&message()).await.expect("send");
    assert_eq!(sent.id.as_deref(), Some("email_123"));

    let requests = state.requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0.as_deref(), Some("Bearer re_test"));
    assert_eq!(requests[0].1, message());
}

#[tokio::test]
async fn non_success_status_is_reported_as_rejection() {
    let (base_url, _state) = spawn_email_api(true).await;
    let client = ResendClient::new(&base_url, Some("re_test".to_string())).expect("client");

    let err = client.send(&message()).await.expect_err("should fail");
    let MailerError::Rejected { status, body } = err else {
        panic!("expected rejection");
    };
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("domain not verified"));
}
