use super::*;
use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::Request,
    response::Response,
};
use mailer::{EmailMessage, EmailSender, MailerError, SentEmail};
use notify_api::{Branding, DELIVERY_FAILED, EMAILS_SENT, INVALID_EMAIL};
use tokio::sync::Mutex;
use tower::ServiceExt;

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<EmailMessage>>,
    fail: bool,
}

#[async_trait]
impl EmailSender for RecordingSender {
    async fn send(&self, message: &EmailMessage) -> Result<SentEmail, MailerError> {
        if self.fail {
            return Err(MailerError::MissingApiKey);
        }
        self.sent.lock().await.push(message.clone());
        Ok(SentEmail::default())
    }
}

fn test_app(sender: Arc<RecordingSender>) -> Router {
    let api = NotifyContext {
        sender,
        branding: Branding {
            brand_name: "Launchpad".to_string(),
            from_address: "Launchpad <notify@launchpad.test>".to_string(),
            operator_address: "team@launchpad.test".to_string(),
            pitch: "Soon.".to_string(),
            welcome_subject: "You're in!".to_string(),
        },
    };
    build_router(Arc::new(AppState { api }))
}

fn notify_request(body: impl Into<Body>) -> Request<Body> {
    Request::post(NOTIFY_ROUTE)
        .header("content-type", "application/json")
        .body(body.into())
        .expect("request")
}

async fn json_body(response: Response) -> serde_json::Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = test_app(Arc::new(RecordingSender::default()));
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn notify_sends_both_emails_and_confirms() {
    let sender = Arc::new(RecordingSender::default());
    let app = test_app(sender.clone());

    let response = app
        .oneshot(notify_request(
            serde_json::json!({ "email": "visitor@example.com" }).to_string(),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "success": true, "message": EMAILS_SENT })
    );

    let sent = sender.sent.lock().await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "team@launchpad.test");
    assert_eq!(sent[1].to, "visitor@example.com");
}

#[tokio::test]
async fn notify_rejects_address_without_at_sign() {
    let sender = Arc::new(RecordingSender::default());
    let app = test_app(sender.clone());

    let response = app
        .oneshot(notify_request(
            serde_json::json!({ "email": "not-an-email" }).to_string(),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "error": INVALID_EMAIL })
    );
    assert!(sender.sent.lock().await.is_empty());
}

#[tokio::test]
async fn notify_rejects_missing_email_field() {
    let app = test_app(Arc::new(RecordingSender::default()));
    let response = app
        .oneshot(notify_request("{}"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "error": INVALID_EMAIL })
    );
}

#[tokio::test]
async fn malformed_body_gets_error_body() {
    let app = test_app(Arc::new(RecordingSender::default()));
    let response = app
        .oneshot(notify_request("{\"email\": "))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "error": INVALID_BODY })
    );
}

#[tokio::test]
async fn delivery_failure_maps_to_generic_server_error() {
    let sender = Arc::new(RecordingSender {
        fail: true,
        ..RecordingSender::default()
    });
    let app = test_app(sender);

    let response = app
        .oneshot(notify_request(
            serde_json::json!({ "email": "visitor@example.com" }).to_string(),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "error": DELIVERY_FAILED })
    );
}

#[tokio::test]
async fn oversized_body_is_refused() {
    let app = test_app(Arc::new(RecordingSender::default()));
    let email = format!("{}@example.com", "a".repeat(MAX_NOTIFY_BODY_BYTES));
    let response = app
        .oneshot(notify_request(serde_json::json!({ "email": email }).to_string()))
        .await
        .expect("response");
    assert!(response.status().is_client_error());
}
