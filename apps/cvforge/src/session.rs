//! The one live CV, its selected layout, and rewrite bookkeeping.
//!
//! Owned by `AppState` behind a `tokio::sync::Mutex`. Handlers take the lock for
//! short, synchronous edits only; a rewrite is split into `begin_improve` and
//! `finish_improve` so the lock is free while the remote call runs.

use tracing::{debug, info, warn};

use crate::cv::CvError;
use crate::improve::{ImproveTarget, ImproveTracker};
use crate::llm_client::LlmError;
use crate::models::{CvData, EntryField, EntryKind, LayoutKind};
use crate::render::{render, VisualDocument};

#[derive(Debug)]
pub struct Session {
    pub cv: CvData,
    pub layout: LayoutKind,
    pub improvements: ImproveTracker,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session starts from the placeholder record under the classic layout.
    pub fn new() -> Self {
        Self::with_cv(CvData::sample())
    }

    pub fn with_cv(cv: CvData) -> Self {
        Session {
            cv,
            layout: LayoutKind::default(),
            improvements: ImproveTracker::new(),
        }
    }

    pub fn set_layout(&mut self, layout: LayoutKind) {
        if self.layout != layout {
            info!(from = ?self.layout, to = ?layout, "layout changed");
        }
        self.layout = layout;
    }

    /// Renders the record under the selected layout.
    pub fn preview(&self) -> VisualDocument {
        self.preview_as(self.layout)
    }

    pub fn preview_as(&self, layout: LayoutKind) -> VisualDocument {
        render(&self.cv, layout)
    }

    /// Removes an entry and drops any rewrite bookkeeping for it.
    pub fn remove_entry(&mut self, kind: EntryKind, id: &str) -> bool {
        let removed = self.cv.remove_entry(kind, id);
        if removed {
            self.improvements.forget_entry(id);
        }
        removed
    }

    /// Reads the text to rewrite and marks the field in flight.
    pub fn begin_improve(&mut self, target: &ImproveTarget) -> Result<String, CvError> {
        let text = self.current_text(target)?;
        let key = target.key();
        if self.improvements.is_in_flight(&key) {
            debug!(?target, "rewrite already in flight; the later result wins");
        }
        self.improvements.begin(key);
        debug!(?target, "rewrite started");
        Ok(text)
    }

    /// Applies the outcome of a rewrite. Returns whether the record changed.
    ///
    /// On failure the field is left as it was. If the target entry was removed while
    /// the call was running, the result is dropped.
    pub fn finish_improve(
        &mut self,
        target: &ImproveTarget,
        outcome: &Result<String, LlmError>,
    ) -> bool {
        let key = target.key();
        let improved = match outcome {
            Ok(text) => text,
            Err(e) => {
                warn!(?target, error = %e, "rewrite failed");
                self.improvements.finish(&key, false);
                return false;
            }
        };

        let applied = match target {
            ImproveTarget::Summary => {
                self.cv.update_summary(improved.as_str());
                true
            }
            ImproveTarget::Experience { id } => {
                self.apply_description(EntryKind::Experience, id, improved)
            }
            ImproveTarget::Education { id } => {
                self.apply_description(EntryKind::Education, id, improved)
            }
        };

        self.improvements.finish(&key, true);
        if !applied {
            debug!(?target, "rewrite target removed while in flight; result dropped");
        }
        applied
    }

    /// Writes a rewritten description, unless the entry is gone.
    fn apply_description(&mut self, kind: EntryKind, id: &str, text: &str) -> bool {
        if !self.cv.has_entry(kind, id) {
            return false;
        }
        match self
            .cv
            .update_entry_field(kind, id, EntryField::Description, text)
        {
            Ok(changed) => changed,
            Err(e) => {
                warn!(%kind, id, error = %e, "rewrite could not be applied");
                false
            }
        }
    }

    fn current_text(&self, target: &ImproveTarget) -> Result<String, CvError> {
        match target {
            ImproveTarget::Summary => Ok(self.cv.summary.clone()),
            ImproveTarget::Experience { id } => self
                .cv
                .experience
                .iter()
                .find(|e| &e.id == id)
                .map(|e| e.description.clone())
                .ok_or_else(|| CvError::EntryNotFound {
                    kind: EntryKind::Experience,
                    id: id.clone(),
                }),
            ImproveTarget::Education { id } => self
                .cv
                .education
                .iter()
                .find(|e| &e.id == id)
                .map(|e| e.description.clone())
                .ok_or_else(|| CvError::EntryNotFound {
                    kind: EntryKind::Education,
                    id: id.clone(),
                }),
        }
    }
}
