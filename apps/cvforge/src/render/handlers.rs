use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::models::LayoutKind;
use crate::render::VisualDocument;
use crate::state::AppState;

/// Optional layout override; the session's selected layout applies when absent.
#[derive(Debug, Default, Deserialize)]
pub struct LayoutQuery {
    pub layout: Option<LayoutKind>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LayoutSelection {
    pub layout: LayoutKind,
}

/// GET /api/v1/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(params): Query<LayoutQuery>,
) -> Json<VisualDocument> {
    let session = state.session.lock().await;
    let doc = match params.layout {
        Some(layout) => session.preview_as(layout),
        None => session.preview(),
    };
    Json(doc)
}

/// GET /api/v1/layout
pub async fn handle_get_layout(State(state): State<AppState>) -> Json<LayoutSelection> {
    let layout = state.session.lock().await.layout;
    Json(LayoutSelection { layout })
}

/// PUT /api/v1/layout
pub async fn handle_set_layout(
    State(state): State<AppState>,
    Json(req): Json<LayoutSelection>,
) -> Json<LayoutSelection> {
    state.session.lock().await.set_layout(req.layout);
    Json(req)
}
