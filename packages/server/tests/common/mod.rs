#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use folio_editor::Document;
use folio_server::{build_router, AppState, Config, MemoryObjectStorage, ObjectStorage};
use std::sync::Arc;
use tower::ServiceExt;

pub const BOUNDARY: &str = "folio-test-boundary";

pub fn app_with(storage: Arc<dyn ObjectStorage>) -> Router {
    let state = AppState::new(&Config::default(), Document::default(), storage).unwrap();
    build_router(Arc::new(state), None)
}

pub fn app() -> Router {
    app_with(Arc::new(MemoryObjectStorage::new("https://bucket.example")))
}

pub fn multipart_body(field: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(email: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::post("/api/storage").header(
        "content-type",
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(email) = email {
        builder = builder.header("x-forwarded-email", email);
    }
    builder.body(Body::from(body)).unwrap()
}

pub fn get(path: &str) -> Request<Body> {
    Request::get(path)
        .header("x-forwarded-email", "user@hunger.ai")
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(path: &str, json: serde_json::Value) -> Request<Body> {
    Request::post(path)
        .header("x-forwarded-email", "user@hunger.ai")
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
