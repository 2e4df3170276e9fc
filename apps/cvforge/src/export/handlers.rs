use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::errors::AppError;
use crate::export::export_document;
use crate::render::handlers::LayoutQuery;
use crate::state::AppState;

/// GET /api/v1/export
///
/// Snapshots the rendered document under the lock, then captures and assembles
/// without it.
pub async fn handle_export(
    State(state): State<AppState>,
    Query(params): Query<LayoutQuery>,
) -> Result<Response, AppError> {
    let (doc, name) = {
        let session = state.session.lock().await;
        let layout = params.layout.unwrap_or(session.layout);
        (
            session.preview_as(layout),
            session.cv.personal_info.name.clone(),
        )
    };

    let exported = export_document(doc, name, state.rasterizer.clone(), state.capture).await?;

    let disposition = format!("attachment; filename=\"{}\"", exported.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(exported.bytes),
    )
        .into_response())
}
