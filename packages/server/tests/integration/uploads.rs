use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::common::{FakeMediaHost, PNG_BYTES, TestApp};

#[tokio::test]
async fn without_media_host_returns_inline_data() {
    let app = TestApp::spawn().await;

    let res = app.admin_upload(&[("image/png", PNG_BYTES)]).await;
    assert_eq!(res.status, 201, "{}", res.text);

    let images = res.body["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    let expected = format!("data:image/png;base64,{}", STANDARD.encode(PNG_BYTES));
    assert_eq!(images[0]["url"], expected.as_str());
    assert!(!images[0]["id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn with_media_host_returns_hosted_urls() {
    let (host, api_base) = FakeMediaHost::start().await;
    let app = TestApp::spawn_with(|config| {
        config.media.cloud_name = Some("demo".into());
        config.media.upload_preset = Some("unsigned".into());
        config.media.api_base = api_base;
    })
    .await;

    let res = app
        .admin_upload(&[("image/png", PNG_BYTES), ("image/webp", &b"webp-bytes"[..])])
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(host.upload_count(), 2);

    let images = res.body["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_ne!(images[0]["id"], images[1]["id"]);
    for img in images {
        assert!(img["url"].as_str().unwrap().starts_with("https://res.cloudinary.test/"));
    }
    assert!(host.uploads.lock().unwrap()[1].starts_with("data:image/webp;base64,"));
}

#[tokio::test]
async fn non_images_are_rejected() {
    let app = TestApp::spawn().await;

    let res = app.admin_upload(&[("application/pdf", &b"%PDF-1.7"[..])]).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn empty_form_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.admin_upload(&[]).await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn oversized_upload_is_refused() {
    let app = TestApp::spawn_with(|config| config.upload.max_bytes = 1024).await;

    let big = vec![0u8; 4096];
    let res = app.admin_upload(&[("image/png", big.as_slice())]).await;
    assert_eq!(res.status, 413);
}
