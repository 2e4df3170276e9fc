use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::improve::tracker::FieldStatus;
use crate::improve::{improve_text, ImproveTarget};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ImproveResponse {
    pub text: String,
    /// False when the target entry was removed while the rewrite ran.
    pub applied: bool,
}

/// POST /api/v1/improve
///
/// The session lock is released for the duration of the remote call, so other
/// edits (including a second rewrite of the same field) proceed meanwhile.
pub async fn handle_improve(
    State(state): State<AppState>,
    Json(target): Json<ImproveTarget>,
) -> Result<Json<ImproveResponse>, AppError> {
    let original = state.session.lock().await.begin_improve(&target)?;

    let outcome = improve_text(state.generator.as_ref(), &original, target.context()).await;

    let applied = state
        .session
        .lock()
        .await
        .finish_improve(&target, &outcome);
    let text = outcome?;

    Ok(Json(ImproveResponse { text, applied }))
}

/// GET /api/v1/improve/status
pub async fn handle_improve_status(State(state): State<AppState>) -> Json<Vec<FieldStatus>> {
    let session = state.session.lock().await;
    Json(session.improvements.report())
}
