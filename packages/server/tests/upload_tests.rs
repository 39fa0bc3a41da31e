//! Upload endpoint scenarios

mod common;

use axum::http::StatusCode;
use common::*;
use folio_server::{FailPoint, MemoryObjectStorage};
use std::sync::Arc;

#[tokio::test]
async fn test_allowed_user_gets_url() {
    let storage = Arc::new(MemoryObjectStorage::new("https://bucket.example"));
    let app = app_with(storage.clone());

    let response = send(
        &app,
        upload_request(
            Some("user@hunger.ai"),
            multipart_body("image", "cover.png", b"\x89PNG"),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let url = json["url"].as_str().unwrap();
    assert!(!url.is_empty());
    assert!(url.starts_with("https://bucket.example/from_editor/cover.png"));
    assert_eq!(
        storage.get("from_editor/cover.png").await,
        Some(b"\x89PNG".to_vec())
    );
}

#[tokio::test]
async fn test_disallowed_domain_is_forbidden() {
    let app = app();
    let response = send(
        &app,
        upload_request(
            Some("user@gmail.com"),
            multipart_body("image", "cover.png", b"png"),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn test_unauthenticated_upload() {
    let app = app();
    let response = send(
        &app,
        upload_request(None, multipart_body("image", "cover.png", b"png")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn test_missing_file_field() {
    let app = app();
    let response = send(
        &app,
        upload_request(
            Some("user@hunger.ai"),
            multipart_body("attachment", "cover.png", b"png"),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn test_stage_failures_are_reported() {
    for (point, stage) in [
        (FailPoint::Put, "uploading"),
        (FailPoint::Presign, "presigning"),
    ] {
        let app = app_with(Arc::new(
            MemoryObjectStorage::new("https://bucket.example").failing_at(point),
        ));
        let response = send(
            &app,
            upload_request(
                Some("user@method.im"),
                multipart_body("image", "cover.png", b"png"),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["stage"], stage);
        assert!(json["error"].as_str().is_some());
        assert!(json.get("url").is_none());
    }
}

#[tokio::test]
async fn test_uploaded_url_fills_cover_image() {
    let app = app();
    for file_name in ["my cover.png", "cover #2?.png"] {
        let response = send(
            &app,
            upload_request(
                Some("user@hunger.ai"),
                multipart_body("image", file_name, b"png"),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let url = body_json(response).await["url"]
            .as_str()
            .unwrap()
            .to_string();

        let response = send(
            &app,
            post_json(
                "/api/mutation",
                serde_json::json!({ "type": "setMeta", "field": "coverImage", "value": url }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "{}", url);
        assert_eq!(body_json(response).await["success"], true);
    }

    let article = body_json(send(&app, get("/api/article")).await).await;
    assert!(article["meta"]["coverImage"]
        .as_str()
        .unwrap()
        .contains("from_editor/cover%20%232%3F.png"));
}
