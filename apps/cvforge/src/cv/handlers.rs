use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{CvData, EntryField, EntryKind, PersonalField};
use crate::state::AppState;

const PHOTO_FIELD: &str = "photo";

#[derive(Deserialize)]
pub struct PersonalFieldUpdate {
    pub field: PersonalField,
    pub value: String,
}

#[derive(Deserialize)]
pub struct SummaryUpdate {
    pub summary: String,
}

#[derive(Deserialize)]
pub struct EntryFieldUpdate {
    pub field: EntryField,
    pub value: String,
}

#[derive(Serialize)]
pub struct EntryCreated {
    pub id: String,
}

#[derive(Deserialize)]
pub struct SkillsReplace {
    pub skills: Vec<String>,
}

#[derive(Deserialize)]
pub struct SkillAdd {
    pub skill: String,
}

/// Resolves the `:kind` path segment. An unknown kind names no collection.
fn entry_kind(slug: &str) -> Result<EntryKind, AppError> {
    EntryKind::from_slug(slug)
        .ok_or_else(|| AppError::NotFound(format!("unknown entry kind '{slug}'")))
}

/// GET /api/v1/cv
pub async fn handle_get_cv(State(state): State<AppState>) -> Json<CvData> {
    let session = state.session.lock().await;
    Json(session.cv.clone())
}

/// PATCH /api/v1/cv/personal
pub async fn handle_update_personal(
    State(state): State<AppState>,
    Json(req): Json<PersonalFieldUpdate>,
) -> StatusCode {
    let mut session = state.session.lock().await;
    session.cv.update_personal_field(req.field, req.value);
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/cv/photo (multipart, field `photo`)
pub async fn handle_set_photo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<StatusCode, AppError> {
    let mut bytes = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(PHOTO_FIELD) {
            bytes = Some(field.bytes().await?);
            break;
        }
    }
    let bytes = bytes
        .ok_or_else(|| AppError::Validation(format!("multipart field '{PHOTO_FIELD}' is required")))?;

    state.session.lock().await.cv.set_photo(&bytes)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/cv/photo
pub async fn handle_clear_photo(State(state): State<AppState>) -> StatusCode {
    state.session.lock().await.cv.clear_photo();
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/cv/summary
pub async fn handle_update_summary(
    State(state): State<AppState>,
    Json(req): Json<SummaryUpdate>,
) -> StatusCode {
    state.session.lock().await.cv.update_summary(req.summary);
    StatusCode::NO_CONTENT
}

/// POST /api/v1/cv/entries/:kind
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<(StatusCode, Json<EntryCreated>), AppError> {
    let kind = entry_kind(&kind)?;
    let id = state.session.lock().await.cv.add_entry(kind);
    Ok((StatusCode::CREATED, Json(EntryCreated { id })))
}

/// PATCH /api/v1/cv/entries/:kind/:id
///
/// Unknown ids are a no-op; a field the kind does not have is rejected.
pub async fn handle_update_entry(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Json(req): Json<EntryFieldUpdate>,
) -> Result<StatusCode, AppError> {
    let kind = entry_kind(&kind)?;
    let mut session = state.session.lock().await;
    session
        .cv
        .update_entry_field(kind, &id, req.field, req.value)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/cv/entries/:kind/:id
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let kind = entry_kind(&kind)?;
    state.session.lock().await.remove_entry(kind, &id);
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/cv/skills
pub async fn handle_set_skills(
    State(state): State<AppState>,
    Json(req): Json<SkillsReplace>,
) -> Result<StatusCode, AppError> {
    state.session.lock().await.cv.set_skills(req.skills)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/cv/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(req): Json<SkillAdd>,
) -> StatusCode {
    state.session.lock().await.cv.add_skill(&req.skill);
    StatusCode::NO_CONTENT
}

/// DELETE /api/v1/cv/skills/:skill
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(skill): Path<String>,
) -> StatusCode {
    state.session.lock().await.cv.remove_skill(&skill);
    StatusCode::NO_CONTENT
}
