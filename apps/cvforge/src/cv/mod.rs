// CV record: the mutation API over `CvData`.
// Only the session (form controller) calls these; the renderer reads `CvData` directly.

pub mod handlers;
pub mod photo;
pub mod record;
pub mod skills;

use thiserror::Error;

use crate::models::{EntryField, EntryKind};

#[derive(Debug, Error)]
pub enum CvError {
    #[error("field '{field}' does not exist on {kind} entries")]
    FieldNotApplicable { kind: EntryKind, field: EntryField },

    #[error("no {kind} entry with id '{id}'")]
    EntryNotFound { kind: EntryKind, id: String },

    #[error("duplicate skill '{0}'")]
    DuplicateSkill(String),

    #[error("unsupported photo format: {0}")]
    UnsupportedPhotoFormat(String),

    #[error("photo could not be decoded: {0}")]
    InvalidPhoto(String),

    #[error("photo is {size} bytes, limit is {limit}")]
    PhotoTooLarge { size: usize, limit: usize },

    #[error("not a base64 data URI")]
    InvalidDataUri,
}
