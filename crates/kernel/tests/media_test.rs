#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for the media registry API.

mod common;

use axum::http::StatusCode;
use common::TestApp;
use muse_test_utils::{assert, test_media};
use serde_json::json;

#[tokio::test]
async fn test_register_and_fetch_media() {
    let app = TestApp::new();
    let (status, body) = app.post("/api/media", test_media("cat.png")).await;
    assert_eq!(status, StatusCode::OK);
    let media = assert::success(&body).clone();
    assert_eq!(media["filename"], "cat.png");
    assert_eq!(media["mime"], "image/png");
    assert_eq!(media["size"], 2048);

    let (status, body) = app
        .get(&format!("/api/media/{}", media["id"].as_str().unwrap()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assert::success(&body)["url"], media["url"]);
}

#[tokio::test]
async fn test_register_defaults_mime_and_size() {
    let app = TestApp::new();
    let (_, body) = app
        .post(
            "/api/media",
            json!({"url": "https://cdn.example.test/x", "filename": "x"}),
        )
        .await;
    let media = assert::success(&body);
    assert_eq!(media["mime"], "image/jpeg");
    assert_eq!(media["size"], 0);
}

#[tokio::test]
async fn test_register_requires_url_and_filename() {
    let app = TestApp::new();
    let (status, body) = app.post("/api/media", json!({"filename": "x"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(assert::failure(&body), "url and filename are required");
}

#[tokio::test]
async fn test_delete_media_leaves_dangling_reference() {
    let app = TestApp::new();
    let (_, body) = app.post("/api/media", test_media("cover.jpg")).await;
    let media_id = assert::success(&body)["id"].as_str().unwrap().to_string();
    let entry = app
        .create_entry(json!({"contentTypeId": "post", "data": {"coverImage": media_id}}))
        .await;

    let (_, body) = app.delete(&format!("/api/media/{media_id}")).await;
    assert_eq!(assert::success(&body)["deleted"], true);

    let (status, _) = app.get(&format!("/api/media/{media_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app
        .get(&format!("/api/entries/{}", entry["id"].as_str().unwrap()))
        .await;
    assert_eq!(assert::success(&body)["data"]["coverImage"], media_id.as_str());
}

#[tokio::test]
async fn test_list_media_paginates() {
    let app = TestApp::new();
    for i in 0..3 {
        app.post("/api/media", test_media(&format!("{i}.png"))).await;
    }

    let (_, body) = app.get("/api/media?limit=2").await;
    let page = assert::success(&body);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
    let next = page["next"].as_str().unwrap();

    let (_, body) = app.get(&format!("/api/media?limit=2&cursor={next}")).await;
    let page = assert::success(&body);
    assert_eq!(page["items"][0]["filename"], "2.png");
    assert!(page["next"].is_null());
}
