use axum::http::StatusCode;
use serde_json::json;

use crate::common::{FakeMailApi, TestApp, routes};

async fn spawn_with_mail(status: StatusCode) -> (TestApp, FakeMailApi) {
    let (api, api_base) = FakeMailApi::start(status).await;
    let app = TestApp::spawn_with(|config| {
        config.mail.api_key = Some("re_test".into());
        config.mail.contact_to = Some("owner@example.com".into());
        config.mail.api_base = api_base;
    })
    .await;
    (app, api)
}

fn message() -> serde_json::Value {
    json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello there" })
}

#[tokio::test]
async fn relays_message_to_mail_api() {
    let (app, api) = spawn_with_mail(StatusCode::OK).await;

    let res = app.post(routes::CONTACT, &message()).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body, json!({ "ok": true, "msg": "Thank you!" }));

    let sent = api.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let (auth, body) = &sent[0];
    assert_eq!(auth, "Bearer re_test");
    assert_eq!(body["to"], json!(["owner@example.com"]));
    assert_eq!(body["from"], "Portfolio <noreply@example.com>");
    assert_eq!(body["subject"], "New portfolio inquiry from Ada");
    assert_eq!(body["reply_to"], "ada@example.com");
    assert_eq!(body["text"], "Hello there");
}

#[tokio::test]
async fn blank_fields_are_rejected() {
    let (app, api) = spawn_with_mail(StatusCode::OK).await;

    for body in [
        json!({ "name": "", "email": "a@b.c", "message": "hi" }),
        json!({ "name": "Ada", "email": "   ", "message": "hi" }),
        json!({ "name": "Ada", "email": "a@b.c" }),
    ] {
        let res = app.post(routes::CONTACT, &body).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["ok"], false);
        assert_eq!(res.body["error"], "Please provide your name, email and message.");
    }
    assert!(api.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unconfigured_mail_is_a_server_error() {
    let app = TestApp::spawn().await;

    let res = app.post(routes::CONTACT, &message()).await;
    assert_eq!(res.status, 500);
    assert_eq!(res.body, json!({ "ok": false, "error": "Mail server not configured." }));
}

#[tokio::test]
async fn provider_failure_is_reported_once() {
    let (app, api) = spawn_with_mail(StatusCode::BAD_GATEWAY).await;

    let res = app.post(routes::CONTACT, &message()).await;
    assert_eq!(res.status, 500);
    assert_eq!(res.body, json!({ "ok": false, "error": "Failed to send message." }));
    assert_eq!(api.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn unreadable_body_keeps_the_envelope() {
    let (app, api) = spawn_with_mail(StatusCode::OK).await;

    let not_json = app
        .client
        .post(app.url(routes::CONTACT))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(not_json.status(), 500);
    let body: serde_json::Value = not_json.json().await.unwrap();
    assert_eq!(body, json!({ "ok": false, "error": "Failed to send message." }));

    let wrong_types = app
        .post(routes::CONTACT, &json!({ "name": 5, "email": "a@b.c", "message": "hi" }))
        .await;
    assert_eq!(wrong_types.status, 500);
    assert_eq!(wrong_types.body["ok"], false);
    assert_eq!(wrong_types.body["error"], "Failed to send message.");

    assert!(api.sent.lock().unwrap().is_empty());
}
