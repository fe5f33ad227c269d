//! Media upload and post update against a fake WordPress.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use wordpress_client::{Credentials, PostUpdate, WordPressClient, WordPressError};

// "editor:app-pass" in base64
const EXPECTED_AUTH: &str = "Basic ZWRpdG9yOmFwcC1wYXNz";

#[derive(Clone, Default)]
struct FakeWordPress {
    uploads: Arc<Mutex<Vec<(String, String, usize)>>>,
    updates: Arc<Mutex<Vec<(i64, Value)>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == EXPECTED_AUTH)
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "code": "rest_not_logged_in", "message": "You are not currently logged in." })),
    )
        .into_response()
}

async fn me(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "id": 3, "name": "Editor" })).into_response()
}

async fn media(State(fake): State<FakeWordPress>, headers: HeaderMap, body: axum::body::Bytes) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mime = headers["content-type"].to_str().unwrap().to_string();
    let disposition = headers["content-disposition"].to_str().unwrap().to_string();
    fake.uploads.lock().unwrap().push((mime, disposition, body.len()));
    (
        StatusCode::CREATED,
        Json(json!({ "id": 99, "source_url": "https://wp.test/wp-content/uploads/barn1.png" })),
    )
        .into_response()
}

async fn update_post(
    State(fake): State<FakeWordPress>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    fake.updates.lock().unwrap().push((id, body.clone()));
    Json(json!({ "id": id, "featured_media": body.get("featured_media") })).into_response()
}

async fn spawn(fake: FakeWordPress) -> String {
    let router = Router::new()
        .route("/wp-json/wp/v2/users/me", get(me))
        .route("/wp-json/wp/v2/media", post(media))
        .route("/wp-json/wp/v2/posts/:id", post(update_post))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    base
}

fn credentials(password: &str) -> Credentials {
    Credentials {
        username: "editor".into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn upload_and_set_featured_media() {
    let fake = FakeWordPress::default();
    let base = spawn(fake.clone()).await;
    let client = WordPressClient::new(&base, credentials("app-pass"), false).unwrap();

    let user = client.current_user().await.unwrap();
    assert_eq!(user.id, 3);

    let media = client
        .upload_media(vec![0u8; 16], "barn1.png", "image/png")
        .await
        .unwrap();
    assert_eq!(media.id, 99);

    let post = client
        .update_post(42, &PostUpdate::featured_media(media.id))
        .await
        .unwrap();
    assert_eq!(post.featured_media, Some(99));

    let uploads = fake.uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, "image/png");
    assert_eq!(uploads[0].1, "attachment; filename=\"barn1.png\"");
    assert_eq!(uploads[0].2, 16);

    let updates = fake.updates.lock().unwrap().clone();
    assert_eq!(updates, vec![(42, json!({ "featured_media": 99 }))]);
}

#[tokio::test]
async fn meta_field_update_is_sent_as_meta_object() {
    let fake = FakeWordPress::default();
    let base = spawn(fake.clone()).await;
    let client = WordPressClient::new(&base, credentials("app-pass"), false).unwrap();

    client
        .update_post(5, &PostUpdate::meta_field("hero_image_id", 12))
        .await
        .unwrap();

    let updates = fake.updates.lock().unwrap().clone();
    assert_eq!(updates, vec![(5, json!({ "meta": { "hero_image_id": 12 } }))]);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let base = spawn(FakeWordPress::default()).await;
    let client = WordPressClient::new(&base, credentials("nope"), false).unwrap();

    let err = client.current_user().await.unwrap_err();

    match err {
        WordPressError::Unauthorized { status, message } => {
            assert_eq!(status, 401);
            assert!(message.starts_with("rest_not_logged_in"));
        }
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}
