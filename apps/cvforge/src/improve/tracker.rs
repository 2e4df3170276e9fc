// In-flight bookkeeping for field rewrites.
//
// Advisory only: it reports which fields have a rewrite outstanding so a client can
// show a spinner or disable a button. It never blocks or de-duplicates a call.

use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImproveField {
    Summary,
    ExperienceDescription,
    EducationDescription,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldKey {
    pub field: ImproveField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
}

impl FieldKey {
    pub fn new(field: ImproveField, entry_id: Option<String>) -> Self {
        FieldKey { field, entry_id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImproveStatus {
    Idle,
    InFlight,
    Failed,
}

#[derive(Debug, Default)]
struct Slot {
    pending: usize,
    last_failed: bool,
}

impl Slot {
    fn status(&self) -> ImproveStatus {
        if self.pending > 0 {
            ImproveStatus::InFlight
        } else if self.last_failed {
            ImproveStatus::Failed
        } else {
            ImproveStatus::Idle
        }
    }
}

/// One row of the status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStatus {
    #[serde(flatten)]
    pub key: FieldKey,
    pub status: ImproveStatus,
    pub pending: usize,
}

#[derive(Debug, Default)]
pub struct ImproveTracker {
    slots: HashMap<FieldKey, Slot>,
}

impl ImproveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, key: FieldKey) {
        let slot = self.slots.entry(key).or_default();
        slot.pending += 1;
        slot.last_failed = false;
    }

    /// Records the outcome of one call. The most recent outcome wins.
    pub fn finish(&mut self, key: &FieldKey, succeeded: bool) {
        let Some(slot) = self.slots.get_mut(key) else {
            return;
        };
        slot.pending = slot.pending.saturating_sub(1);
        slot.last_failed = !succeeded;
        if slot.pending == 0 && succeeded {
            self.slots.remove(key);
        }
    }

    pub fn status(&self, key: &FieldKey) -> ImproveStatus {
        self.slots
            .get(key)
            .map(Slot::status)
            .unwrap_or(ImproveStatus::Idle)
    }

    pub fn is_in_flight(&self, key: &FieldKey) -> bool {
        self.status(key) == ImproveStatus::InFlight
    }

    /// Drops the bookkeeping for a removed entry. Calls still outstanding finish silently.
    pub fn forget_entry(&mut self, entry_id: &str) {
        self.slots
            .retain(|key, _| key.entry_id.as_deref() != Some(entry_id));
    }

    /// Every field that is in flight or whose last rewrite failed, in a stable order.
    pub fn report(&self) -> Vec<FieldStatus> {
        let mut rows: Vec<FieldStatus> = self
            .slots
            .iter()
            .map(|(key, slot)| FieldStatus {
                key: key.clone(),
                status: slot.status(),
                pending: slot.pending,
            })
            .collect();
        rows.sort_by(|a, b| {
            (a.key.field as u8, &a.key.entry_id).cmp(&(b.key.field as u8, &b.key.entry_id))
        });
        rows
    }
}
