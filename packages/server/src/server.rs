use crate::auth::{AuthError, Identity};
use crate::errors::{ActionResponse, ApiError};
use crate::state::AppState;
use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, DefaultBodyLimit, Json, Multipart,
        Request, State,
    },
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Router,
};
use folio_compiler_html::{compile_article, compile_picker, CompileOptions, PickerEntry};
use folio_editor::{EditorError, LineOp, Mutation, PipelineResult};
use folio_model::default_block_for_tag;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Largest accepted upload body
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build the HTTP app. When `uploads_dir` is set, written objects are
/// served from it at `/uploads` without passing the auth gate.
pub fn build_router(state: Arc<AppState>, uploads_dir: Option<PathBuf>) -> Router {
    let app = Router::new()
        .route("/", get(page_handler))
        .route("/api/article", get(article_handler))
        .route("/api/mutation", post(mutation_handler))
        .route("/api/lines", post(lines_handler))
        .route("/api/drag/start", post(drag_start_handler))
        .route("/api/drag/end", post(drag_end_handler))
        .route("/api/drag/cancel", post(drag_cancel_handler))
        .route("/api/editor", get(editor_handler))
        .route("/api/validate", get(validate_handler))
        .route("/api/preview", get(preview_handler))
        .route("/api/meta", get(meta_card_handler))
        .route("/api/picker", get(picker_handler))
        .route("/api/picker/open", post(picker_open_handler))
        .route("/api/picker/close", post(picker_close_handler))
        .route("/api/export", get(export_handler))
        .route(
            "/api/storage",
            post(upload_handler).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_identity))
        .with_state(state);

    let app = match uploads_dir {
        Some(dir) => app.nest_service("/uploads", ServeDir::new(dir)),
        None => app,
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Auth gate
// ============================================================================

async fn require_identity(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.auth.authorize(request.headers()) {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(AuthError::Unauthenticated) if !request.uri().path().starts_with("/api/") => {
            Redirect::to(&state.sign_in_url).into_response()
        }
        Err(AuthError::Unauthenticated) => {
            tracing::info!(path = %request.uri().path(), "rejected unauthenticated request");
            (
                StatusCode::UNAUTHORIZED,
                Json(ActionResponse::failure("Not signed in")),
            )
                .into_response()
        }
        Err(AuthError::Forbidden { email }) => {
            tracing::warn!(%email, path = %request.uri().path(), "rejected disallowed domain");
            (
                StatusCode::FORBIDDEN,
                Json(ActionResponse::failure("Email domain is not allowed")),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Article and preview
// ============================================================================

async fn page_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let session = state.session.read().await;
    Html(compile_article(session.article(), CompileOptions::default()))
}

async fn article_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.read().await;
    Json(session.article().clone())
}

async fn preview_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let mut session = state.session.write().await;
    Html(session.preview())
}

async fn meta_card_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let session = state.session.read().await;
    Html(session.meta_card())
}

async fn editor_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.read().await;
    Json(session.editor())
}

async fn validate_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.read().await;
    Json(session.validate())
}

// ============================================================================
// Mutations
// ============================================================================

fn applied(result: PipelineResult) -> Json<ActionResponse> {
    Json(ActionResponse {
        success: true,
        version: Some(result.version),
        changed: Some(result.changed),
        error: None,
    })
}

/// Decode a mutation body. An `appendBlock` naming a kind the registry does
/// not know is an internal error; any other shape mismatch is a bad request.
fn parse_mutation(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Mutation, ApiError> {
    let Json(value) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    if value["type"] == "appendBlock" {
        if let Some(kind) = value["kind"].as_str() {
            default_block_for_tag(kind).map_err(EditorError::from)?;
        }
    }

    serde_json::from_value(value).map_err(|err| ApiError::BadRequest(err.to_string()))
}

async fn mutation_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ActionResponse>, ApiError> {
    let mutation = parse_mutation(payload)?;
    let mut session = state.session.write().await;
    let result = session.apply(mutation)?;
    tracing::info!(version = result.version, "mutation applied");
    Ok(applied(result))
}

#[derive(Debug, Deserialize)]
struct LinesRequest {
    index: usize,
    #[serde(flatten)]
    op: LineOp,
}

async fn lines_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LinesRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let mut session = state.session.write().await;
    match session.apply_line_op(request.index, request.op)? {
        Some(result) => Ok(applied(result)),
        None => Ok(Json(ActionResponse {
            changed: Some(false),
            ..ActionResponse::ok()
        })),
    }
}

#[derive(Debug, Deserialize)]
struct DragStartRequest {
    index: usize,
}

#[derive(Debug, Deserialize)]
struct DragEndRequest {
    over: Option<usize>,
}

async fn drag_start_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DragStartRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    state.session.write().await.start_drag(request.index)?;
    Ok(Json(ActionResponse::ok()))
}

async fn drag_end_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DragEndRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let mut session = state.session.write().await;
    match session.end_drag(request.over)? {
        Some(result) => Ok(applied(result)),
        None => Ok(Json(ActionResponse {
            changed: Some(false),
            ..ActionResponse::ok()
        })),
    }
}

async fn drag_cancel_handler(State(state): State<Arc<AppState>>) -> Json<ActionResponse> {
    let cancelled = state.session.write().await.cancel_drag();
    Json(ActionResponse {
        changed: Some(cancelled),
        ..ActionResponse::ok()
    })
}

// ============================================================================
// Picker
// ============================================================================

#[derive(Debug, Serialize)]
struct PickerResponse {
    open: bool,
    entries: Vec<PickerEntry>,
}

async fn picker_handler(State(state): State<Arc<AppState>>) -> Json<PickerResponse> {
    let open = state.session.read().await.picker_open();
    Json(PickerResponse {
        open,
        entries: compile_picker(CompileOptions::default()),
    })
}

async fn picker_open_handler(State(state): State<Arc<AppState>>) -> Json<ActionResponse> {
    state.session.write().await.open_picker();
    Json(ActionResponse::ok())
}

async fn picker_close_handler(State(state): State<Arc<AppState>>) -> Json<ActionResponse> {
    state.session.write().await.close_picker();
    Json(ActionResponse::ok())
}

// ============================================================================
// Export
// ============================================================================

#[derive(Debug, Serialize)]
struct InvalidExportResponse {
    success: bool,
    errors: folio_model::ValidationReport,
}

async fn export_handler(State(state): State<Arc<AppState>>) -> Response {
    let session = state.session.read().await;
    match session.export() {
        Ok(artifact) => (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    folio_model::ExportArtifact::CONTENT_TYPE.to_string(),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", artifact.file_name),
                ),
            ],
            artifact.contents,
        )
            .into_response(),
        Err(EditorError::Invalid(report)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(InvalidExportResponse {
                success: false,
                errors: report,
            }),
        )
            .into_response(),
        Err(e) => ApiError::Editor(e).into_response(),
    }
}

// ============================================================================
// Upload
// ============================================================================

#[derive(Debug, Serialize)]
struct UploadResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<crate::upload::UploadStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl UploadResponse {
    fn rejected() -> Self {
        Self {
            success: false,
            url: None,
            stage: None,
            error: None,
        }
    }
}

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

/// First `image` field of the form, if any
async fn read_image_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, String> {
    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| e.to_string())?;
        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

async fn upload_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    multipart: Result<Multipart, MultipartRejection>,
) -> (StatusCode, Json<UploadResponse>) {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::info!(error = %rejection, "upload is not a multipart form");
            return (StatusCode::BAD_REQUEST, Json(UploadResponse::rejected()));
        }
    };

    let file = match read_image_field(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => {
            tracing::info!(user = %identity.0, "upload without an image field");
            return (StatusCode::BAD_REQUEST, Json(UploadResponse::rejected()));
        }
        Err(e) => {
            tracing::info!(error = %e, "malformed multipart body");
            return (StatusCode::BAD_REQUEST, Json(UploadResponse::rejected()));
        }
    };

    let result = state
        .uploads
        .upload(&file.file_name, file.bytes, file.content_type.as_deref())
        .await;

    match result {
        Ok(object) => {
            tracing::info!(user = %identity.0, key = %object.key, "image uploaded");
            (
                StatusCode::OK,
                Json(UploadResponse {
                    success: true,
                    url: Some(object.url),
                    stage: None,
                    error: None,
                }),
            )
        }
        Err(e) => match e.stage() {
            Some(stage) => {
                tracing::error!(user = %identity.0, %stage, error = %e, "upload failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(UploadResponse {
                        success: false,
                        url: None,
                        stage: Some(stage),
                        error: Some(e.to_string()),
                    }),
                )
            }
            None => (
                StatusCode::BAD_REQUEST,
                Json(UploadResponse {
                    error: Some(e.to_string()),
                    ..UploadResponse::rejected()
                }),
            ),
        },
    }
}
