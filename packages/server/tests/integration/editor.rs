use serde_json::json;

use crate::common::{TestApp, image, routes};

fn image_ids(body: &serde_json::Value) -> Vec<String> {
    body["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|img| img["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn create_generates_unique_slugs() {
    let app = TestApp::spawn().await;

    assert_eq!(app.create_project("My Project", json!([])).await, "my-project");
    assert_eq!(app.create_project("My Project", json!([])).await, "my-project-1");
    assert_eq!(app.create_project("my  project!!", json!([])).await, "my-project-2");
}

#[tokio::test]
async fn slug_avoids_published_only_records() {
    let app = TestApp::spawn().await;
    let slug = app.publish_new_project("Shared Name").await;
    assert_eq!(slug, "shared-name");

    assert_eq!(app.create_project("Shared Name", json!([])).await, "shared-name-1");
}

#[tokio::test]
async fn blank_title_uses_untitled_slug() {
    let app = TestApp::spawn().await;

    let res = app
        .admin_post(routes::ADMIN_PROJECTS, &json!({ "title": "   " }))
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["slug"], "untitled");
    assert_eq!(res.body["id"], "untitled");
    assert_eq!(res.body["title"], "");
}

#[tokio::test]
async fn create_rejects_bad_payloads() {
    let app = TestApp::spawn().await;

    let long = app
        .admin_post(routes::ADMIN_PROJECTS, &json!({ "title": "x".repeat(257) }))
        .await;
    assert_eq!(long.status, 400);
    assert_eq!(long.body["code"], "VALIDATION_ERROR");

    let missing_title = app
        .admin_post(routes::ADMIN_PROJECTS, &json!({ "descriptionHTML": "<p>x</p>" }))
        .await;
    assert_eq!(missing_title.status, 400);
    assert_eq!(missing_title.body["code"], "VALIDATION_ERROR");

    let dup_images = app
        .admin_post(
            routes::ADMIN_PROJECTS,
            &json!({ "title": "Dup", "images": [image("a", "https://x/1.png"), image("a", "https://x/2.png")] }),
        )
        .await;
    assert_eq!(dup_images.status, 400);
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let app = TestApp::spawn().await;
    let images = json!([image("a", "https://cdn.example.com/a.webp")]);
    let created = app
        .admin_post(
            routes::ADMIN_PROJECTS,
            &json!({ "title": "Round Trip", "descriptionHTML": "<p><b>bold</b></p>", "images": images }),
        )
        .await;
    assert_eq!(created.status, 201);

    let fetched = app.admin_get(&routes::admin_project("round-trip")).await;
    assert_eq!(fetched.status, 200);
    for field in ["id", "slug", "title", "descriptionHTML", "images", "status", "createdAt"] {
        assert_eq!(fetched.body[field], created.body[field], "field {field}");
    }
    assert_eq!(fetched.body["status"], "draft");
}

#[tokio::test]
async fn drafts_list_most_recently_updated_first() {
    let app = TestApp::spawn().await;
    app.create_project("Alpha", json!([])).await;
    app.create_project("Beta", json!([])).await;

    let edit = app
        .admin_patch(&routes::admin_project("alpha"), &json!({ "title": "Alpha v2" }))
        .await;
    assert_eq!(edit.status, 200);

    let res = app.admin_get(routes::ADMIN_PROJECTS).await;
    let slugs: Vec<&str> = res.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, ["alpha", "beta"]);
}

#[tokio::test]
async fn edits_keep_slug_and_refresh_updated_at() {
    let app = TestApp::spawn().await;
    let slug = app.create_project("Original", json!([])).await;
    let before = app.admin_get(&routes::admin_project(&slug)).await;

    let res = app
        .admin_patch(
            &routes::admin_project(&slug),
            &json!({ "title": "Renamed", "descriptionHTML": "<p>new</p>" }),
        )
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["slug"], "original");
    assert_eq!(res.body["title"], "Renamed");
    assert_eq!(res.body["descriptionHTML"], "<p>new</p>");
    assert_eq!(res.body["createdAt"], before.body["createdAt"]);
    assert!(res.body["updatedAt"].as_i64() > before.body["updatedAt"].as_i64());
}

#[tokio::test]
async fn editing_unknown_project_is_not_found() {
    let app = TestApp::spawn().await;

    assert_eq!(app.admin_get(&routes::admin_project("nope")).await.status, 404);
    let res = app
        .admin_patch(&routes::admin_project("nope"), &json!({ "title": "x" }))
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn image_operations() {
    let app = TestApp::spawn().await;
    let slug = app
        .create_project("Gallery", json!([image("a", "https://x/a.png")]))
        .await;

    let appended = app
        .admin_post(
            &routes::admin_images(&slug),
            &json!({ "images": [image("b", "https://x/b.png"), image("c", "https://x/c.png")] }),
        )
        .await;
    assert_eq!(appended.status, 200, "{}", appended.text);
    assert_eq!(image_ids(&appended.body), ["a", "b", "c"]);

    let clash = app
        .admin_post(&routes::admin_images(&slug), &json!({ "images": [image("a", "https://x/z.png")] }))
        .await;
    assert_eq!(clash.status, 400);

    let reordered = app
        .admin_put(&routes::admin_images_reorder(&slug), &json!({ "imageIds": ["c", "a", "b"] }))
        .await;
    assert_eq!(reordered.status, 200);
    assert_eq!(image_ids(&reordered.body), ["c", "a", "b"]);

    let captioned = app
        .admin_patch(&routes::admin_image(&slug, "a"), &json!({ "alt": "Front" }))
        .await;
    assert_eq!(captioned.status, 200);
    assert_eq!(captioned.body["images"][1]["alt"], "Front");

    let deleted = app.admin_delete(&routes::admin_image(&slug, "b")).await;
    assert_eq!(deleted.status, 204);
    let after = app.admin_get(&routes::admin_project(&slug)).await;
    assert_eq!(image_ids(&after.body), ["c", "a"]);

    let gone = app.admin_delete(&routes::admin_image(&slug, "b")).await;
    assert_eq!(gone.status, 404);
}

#[tokio::test]
async fn reorder_must_be_a_permutation() {
    let app = TestApp::spawn().await;
    let slug = app
        .create_project("Order", json!([image("a", "https://x/a.png"), image("b", "https://x/b.png")]))
        .await;

    for ids in [json!([]), json!(["a"]), json!(["a", "a"]), json!(["a", "zzz"])] {
        let res = app
            .admin_put(&routes::admin_images_reorder(&slug), &json!({ "imageIds": ids }))
            .await;
        assert_eq!(res.status, 400, "ids {ids}");
    }

    let unchanged = app.admin_get(&routes::admin_project(&slug)).await;
    assert_eq!(image_ids(&unchanged.body), ["a", "b"]);
}

#[tokio::test]
async fn opening_published_only_project_seeds_a_draft() {
    let app = TestApp::spawn().await;
    let slug = app.publish_new_project("Seeded").await;

    // Remove the draft partition file so only the published record remains.
    std::fs::remove_file(app.data_dir.path().join("kreo.draft.projects.json")).unwrap();
    assert_eq!(app.admin_get(routes::ADMIN_PROJECTS).await.body["data"], json!([]));

    let opened = app.admin_get(&routes::admin_project(&slug)).await;
    assert_eq!(opened.status, 200);
    assert_eq!(opened.body["status"], "draft");
    assert!(opened.body.get("publishedAt").is_none());
    assert_eq!(opened.body["title"], "Seeded");

    let drafts = app.admin_get(routes::ADMIN_PROJECTS).await;
    assert_eq!(drafts.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn publishing_unknown_slug_changes_nothing() {
    let app = TestApp::spawn().await;
    app.publish_new_project("Existing").await;

    let read = |name: &str| std::fs::read(app.data_dir.path().join(name)).unwrap();
    let drafts_before = read("kreo.draft.projects.json");
    let published_before = read("kreo.published.projects.json");

    let res = app
        .admin_post(&routes::admin_publish("missing-slug"), &json!({}))
        .await;
    assert_eq!(res.status, 404);

    assert_eq!(read("kreo.draft.projects.json"), drafts_before);
    assert_eq!(read("kreo.published.projects.json"), published_before);
}

#[tokio::test]
async fn oversized_draft_is_refused_and_previous_value_kept() {
    let app = TestApp::spawn_with(|config| config.storage.max_partition_bytes = 2_000).await;
    let slug = app.create_project("Small", json!([])).await;

    let big_blob = format!("data:image/png;base64,{}", "A".repeat(4_000));
    let res = app
        .admin_post(&routes::admin_images(&slug), &json!({ "images": [image("big", &big_blob)] }))
        .await;
    assert_eq!(res.status, 413);
    assert_eq!(res.body["code"], "PAYLOAD_TOO_LARGE");

    let kept = app.admin_get(&routes::admin_project(&slug)).await;
    assert_eq!(kept.status, 200);
    assert_eq!(kept.body["images"], json!([]));
}
