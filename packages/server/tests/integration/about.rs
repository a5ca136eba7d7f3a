use serde_json::json;

use crate::common::{FakeMediaHost, TestApp, routes};

fn profile() -> serde_json::Value {
    json!({
        "name": "Kreo",
        "tagline": "Designer",
        "bio": "Builds things.",
        "avatarUrl": "data:image/png;base64,AVATAR",
        "experiences": [
            { "id": "1", "company": "Acme", "role": "Lead", "period": "2021 - 2024",
              "logoUrl": "data:image/png;base64,LOGO", "highlight": true },
            { "id": "2", "company": "Plain Co" }
        ]
    })
}

#[tokio::test]
async fn draft_starts_empty() {
    let app = TestApp::spawn().await;

    let res = app.admin_get(routes::ADMIN_ABOUT).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["slug"], "about");
    assert_eq!(res.body["experiences"], json!([]));
}

#[tokio::test]
async fn saved_draft_is_private_until_published() {
    let app = TestApp::spawn().await;

    let saved = app.admin_put(routes::ADMIN_ABOUT, &profile()).await;
    assert_eq!(saved.status, 200, "{}", saved.text);
    assert_eq!(saved.body["name"], "Kreo");
    assert!(app.get(routes::ABOUT).await.body.get("name").is_none());

    let published = app.admin_post(routes::ADMIN_ABOUT_PUBLISH, &json!({})).await;
    assert_eq!(published.status, 200);

    let public = app.get(routes::ABOUT).await;
    assert_eq!(public.body["name"], "Kreo");
    assert_eq!(public.body["status"], "published");
    assert_eq!(public.body["experiences"][0]["company"], "Acme");
    assert_eq!(public.body["experiences"][1]["company"], "Plain Co");
}

#[tokio::test]
async fn resaving_keeps_created_at() {
    let app = TestApp::spawn().await;
    let first = app.admin_put(routes::ADMIN_ABOUT, &profile()).await;
    let second = app
        .admin_put(routes::ADMIN_ABOUT, &json!({ "name": "Kreo Studio" }))
        .await;

    assert_eq!(second.body["createdAt"], first.body["createdAt"]);
    assert_eq!(second.body["name"], "Kreo Studio");
    assert_eq!(second.body["experiences"], json!([]));
}

#[tokio::test]
async fn saving_over_published_profile_keeps_its_created_at() {
    let app = TestApp::spawn().await;
    app.admin_put(routes::ADMIN_ABOUT, &profile()).await;
    let published = app.admin_post(routes::ADMIN_ABOUT_PUBLISH, &json!({})).await;
    assert_eq!(published.status, 200);

    // Only the published profile remains.
    std::fs::remove_file(app.data_dir.path().join("kreo.about.draft.json")).unwrap();

    let saved = app
        .admin_put(routes::ADMIN_ABOUT, &json!({ "name": "Kreo Studio" }))
        .await;
    assert_eq!(saved.status, 200, "{}", saved.text);
    assert_eq!(saved.body["createdAt"], published.body["createdAt"]);
    assert_eq!(saved.body["status"], "draft");
    assert_eq!(saved.body["name"], "Kreo Studio");
    assert_eq!(app.get(routes::ABOUT).await.body["name"], "Kreo");
}

#[tokio::test]
async fn experience_needs_company() {
    let app = TestApp::spawn().await;
    let res = app
        .admin_put(
            routes::ADMIN_ABOUT,
            &json!({ "experiences": [{ "id": "1", "company": " " }] }),
        )
        .await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn publishing_without_draft_is_not_found() {
    let app = TestApp::spawn().await;
    let res = app.admin_post(routes::ADMIN_ABOUT_PUBLISH, &json!({})).await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn avatar_and_logos_migrate_on_publish() {
    let (host, api_base) = FakeMediaHost::start().await;
    let app = TestApp::spawn_with(|config| {
        config.media.cloud_name = Some("demo".into());
        config.media.upload_preset = Some("unsigned".into());
        config.media.api_base = api_base;
    })
    .await;

    app.admin_put(routes::ADMIN_ABOUT, &profile()).await;
    let res = app.admin_post(routes::ADMIN_ABOUT_PUBLISH, &json!({})).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(host.upload_count(), 2);

    let avatar = res.body["avatarUrl"].as_str().unwrap();
    let logo = res.body["experiences"][0]["logoUrl"].as_str().unwrap();
    assert!(avatar.starts_with("https://res.cloudinary.test/"));
    assert!(logo.starts_with("https://res.cloudinary.test/"));
}
