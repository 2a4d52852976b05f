use crate::error::ApiError;
use crate::middleware::timing_logger;
use crate::models::*;
use crate::pdf_pages::PdfPages;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use citation_engine::{DocumentTextIndex, QaResponse};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;

pub fn router(state: Arc<AppState>) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health))
        .route("/documents/:id", get(document_info).delete(close_document))
        .route(
            "/documents/:id/pages",
            put(open_from_pages).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/documents/:id/pdf",
            put(open_from_pdf).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/documents/:id/citations", post(resolve_citations))
        .layer(middleware::from_fn(timing_logger))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        documents: state.registry.len().await,
    })
}

async fn open_from_pages(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
    Json(request): Json<PagesRequest>,
) -> Result<Json<DocumentInfo>, ApiError> {
    let index = tokio::task::spawn_blocking(move || DocumentTextIndex::build(request.pages)).await?;
    register(&state, document_id, index).await
}

async fn open_from_pdf(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
    pdf: Bytes,
) -> Result<Json<DocumentInfo>, ApiError> {
    let pages = PdfPages::extract(pdf)
        .await
        .map_err(|err| ApiError::UnreadablePdf(format!("{:#}", err)))?;
    // Normalizing a whole book is CPU-bound; keep it off the async workers.
    let runtime = tokio::runtime::Handle::current();
    let index = tokio::task::spawn_blocking(move || runtime.block_on(DocumentTextIndex::load(&pages)))
        .await?
        .map_err(|err| ApiError::UnreadablePdf(format!("{:#}", err)))?;

    register(&state, document_id, index).await
}

async fn register(
    state: &AppState,
    document_id: String,
    index: DocumentTextIndex,
) -> Result<Json<DocumentInfo>, ApiError> {
    let info = DocumentInfo::new(document_id.clone(), &index);
    state.registry.insert(document_id, Arc::new(index)).await?;
    Ok(Json(info))
}

async fn document_info(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> Result<Json<DocumentInfo>, ApiError> {
    match state.registry.get(&document_id).await {
        Some(index) => Ok(Json(DocumentInfo::new(document_id, &index))),
        None => Err(ApiError::DocumentNotFound(document_id)),
    }
}

async fn close_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.registry.remove(&document_id).await {
        log::info!("Closed document {}", document_id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::DocumentNotFound(document_id))
    }
}

// A document that is not open yet resolves against the empty index, so the
// answer still renders, just without page badges.
async fn resolve_citations(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
    Json(response): Json<QaResponse>,
) -> Result<Json<ChatMessage>, ApiError> {
    let start_time = Instant::now();
    let index = state.index_or_empty(&document_id).await;

    let worker_state = state.clone();
    let resolved =
        tokio::task::spawn_blocking(move || worker_state.service.resolve_response(&response, &index))
            .await?;

    let processing_time = start_time.elapsed().as_millis();
    Ok(Json(ChatMessage::from_resolved(resolved, processing_time)))
}
