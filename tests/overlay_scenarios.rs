use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use repo_overlay::directory::GitHubDirectory;
use repo_overlay::overlay::Overlay;
use repo_overlay::rest::{router, AppState};
use repo_overlay::storage::{JsonFileStore, OverrideStore, SqliteStore};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn github_mock() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 42,
            "name": "hello-world",
            "full_name": "octocat/hello-world",
            "description": null,
            "html_url": "https://github.com/octocat/hello-world",
            "language": "Rust",
            "stargazers_count": 10,
            "forks_count": 2,
            "updated_at": "2024-05-01T12:00:00Z",
            "topics": ["demo"]
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/doesnotexist123/repos"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;
    server
}

fn app(server: &MockServer, store: Arc<dyn OverrideStore>) -> Router {
    let directory =
        GitHubDirectory::new(server.uri().parse().unwrap(), Duration::from_secs(5)).unwrap();
    let overlay = Overlay::new(Arc::new(directory), store, "octocat");
    router(AppState::new(overlay))
}

async fn call(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = router
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn edit_cycle(router: Router) {
    let (status, list) = call(&router, Method::GET, "/api/repos?user=octocat", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["id"], 42);
    assert_eq!(list[0]["description"], "No description");
    assert_eq!(list[0]["isCustomDescription"], false);

    let (status, saved) = call(
        &router,
        Method::PUT,
        "/api/repos/42/description",
        Some(json!({ "text": "A demo" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["ok"], true);
    assert_eq!(saved["description"]["text"], "A demo");

    let (_, list) = call(&router, Method::GET, "/api/repos?user=octocat", None).await;
    assert_eq!(list[0]["description"], "A demo");
    assert_eq!(list[0]["isCustomDescription"], true);

    let (status, deleted) =
        call(&router, Method::DELETE, "/api/repos/42/description", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "ok": true }));

    let (_, list) = call(&router, Method::GET, "/api/repos?user=octocat", None).await;
    assert_eq!(list[0]["description"], "No description");
    assert_eq!(list[0]["isCustomDescription"], false);
}

#[tokio::test]
async fn override_cycle_with_json_document() {
    let server = github_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("descriptions.json")));
    store.init().unwrap();

    edit_cycle(app(&server, store.clone())).await;

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(serde_json::from_str::<Value>(&raw).unwrap(), json!({}));
}

#[tokio::test]
async fn override_cycle_with_sqlite() {
    let server = github_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::new(dir.path().join("overrides.sqlite")));
    store.init().unwrap();

    edit_cycle(app(&server, store)).await;
}

#[tokio::test]
async fn unknown_owner_is_reported_as_not_found() {
    let server = github_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("descriptions.json")));
    let router = app(&server, store);

    let (status, body) =
        call(&router, Method::GET, "/api/repos?user=doesnotexist123", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
}

#[tokio::test]
async fn overrides_survive_a_restart() {
    let server = github_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("descriptions.json");

    let first = app(&server, Arc::new(JsonFileStore::new(&doc)));
    call(
        &first,
        Method::PUT,
        "/api/repos/42/description",
        Some(json!({ "text": "persisted" })),
    )
    .await;

    let second = app(&server, Arc::new(JsonFileStore::new(&doc)));
    let (_, body) = call(&second, Method::GET, "/api/repos/42/description", None).await;
    assert_eq!(body, json!({ "text": "persisted" }));
}
