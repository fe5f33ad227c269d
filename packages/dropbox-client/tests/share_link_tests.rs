//! Upload and share-link behaviour against a fake Dropbox.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use dropbox_client::{DropboxClient, DropboxError, WriteMode};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct FakeDropbox {
    files: Arc<Mutex<HashMap<String, usize>>>,
    links: Arc<Mutex<HashMap<String, String>>>,
    /// When true, conflicts omit the existing link metadata.
    bare_conflicts: bool,
}

async fn upload(State(fake): State<FakeDropbox>, headers: HeaderMap, body: axum::body::Bytes) -> Json<Value> {
    let arg: Value = serde_json::from_str(headers["dropbox-api-arg"].to_str().unwrap()).unwrap();
    let path = arg["path"].as_str().unwrap().to_string();
    assert_eq!(arg["mode"], "overwrite");
    fake.files.lock().unwrap().insert(path.clone(), body.len());
    Json(json!({
        "id": format!("id:{}", path),
        "name": path.rsplit('/').next().unwrap(),
        "path_display": path,
        "path_lower": path.to_lowercase(),
        "size": body.len(),
    }))
}

async fn create_link(State(fake): State<FakeDropbox>, Json(arg): Json<Value>) -> Response {
    let path = arg["path"].as_str().unwrap().to_string();
    let mut links = fake.links.lock().unwrap();
    if let Some(existing) = links.get(&path) {
        let error = if fake.bare_conflicts {
            json!({ ".tag": "shared_link_already_exists" })
        } else {
            json!({
                ".tag": "shared_link_already_exists",
                "shared_link_already_exists": { ".tag": "metadata", "metadata": { "url": existing } }
            })
        };
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error_summary": "shared_link_already_exists/..", "error": error })),
        )
            .into_response();
    }
    let url = format!("https://www.dropbox.com/scl/fi/{}/file?dl=0", links.len() + 1);
    links.insert(path, url.clone());
    Json(json!({ ".tag": "file", "url": url })).into_response()
}

async fn list_links(State(fake): State<FakeDropbox>, Json(arg): Json<Value>) -> Json<Value> {
    let path = arg["path"].as_str().unwrap();
    let links: Vec<Value> = fake
        .links
        .lock()
        .unwrap()
        .get(path)
        .map(|url| vec![json!({ ".tag": "file", "url": url })])
        .unwrap_or_default();
    Json(json!({ "links": links, "has_more": false }))
}

async fn spawn(fake: FakeDropbox) -> DropboxClient {
    let router = Router::new()
        .route("/files/upload", post(upload))
        .route("/sharing/create_shared_link_with_settings", post(create_link))
        .route("/sharing/list_shared_links", post(list_links))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    DropboxClient::new("test-token".into()).with_base_urls(base.clone(), base)
}

#[tokio::test]
async fn upload_returns_metadata() {
    let fake = FakeDropbox::default();
    let client = spawn(fake.clone()).await;

    let metadata = client
        .upload("/snefuru/barn1.png", vec![1, 2, 3, 4], WriteMode::Overwrite)
        .await
        .unwrap();

    assert_eq!(metadata.name, "barn1.png");
    assert_eq!(metadata.size, 4);
    assert_eq!(fake.files.lock().unwrap().get("/snefuru/barn1.png"), Some(&4));
}

#[tokio::test]
async fn sharing_same_path_twice_reuses_link_from_conflict() {
    let client = spawn(FakeDropbox::default()).await;

    let first = client.share_link("/snefuru/barn1.png").await.unwrap();
    let second = client.share_link("/snefuru/barn1.png").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn sharing_same_path_twice_lists_links_when_conflict_is_bare() {
    let client = spawn(FakeDropbox {
        bare_conflicts: true,
        ..Default::default()
    })
    .await;

    let first = client.share_link("/snefuru/barn1.png").await.unwrap();
    let second = client.share_link("/snefuru/barn1.png").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn create_shared_link_surfaces_conflict() {
    let client = spawn(FakeDropbox::default()).await;

    client.create_shared_link("/snefuru/a.png").await.unwrap();
    let err = client.create_shared_link("/snefuru/a.png").await.unwrap_err();

    assert!(matches!(err, DropboxError::SharedLinkAlreadyExists(Some(_))));
}
