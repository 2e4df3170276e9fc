//! Entry and scalar-field mutations on [`CvData`].
//!
//! Entries are addressed by their generated id. Removing or updating an id that is
//! no longer present is a no-op: the UI can race a second click against the first.

use tracing::debug;

use crate::cv::CvError;
use crate::models::{
    Course, CvData, Education, EntryField, EntryKind, Experience, PersonalField,
};

impl CvData {
    /// Replaces one scalar field of the personal info. Any string is accepted.
    /// An empty website clears it.
    pub fn update_personal_field(&mut self, field: PersonalField, value: impl Into<String>) {
        let value = value.into();
        let info = &mut self.personal_info;
        match field {
            PersonalField::Name => info.name = value,
            PersonalField::Email => info.email = value,
            PersonalField::Phone => info.phone = value,
            PersonalField::Address => info.address = value,
            PersonalField::Linkedin => info.linkedin = value,
            PersonalField::Github => info.github = value,
            PersonalField::Website => {
                info.website = if value.is_empty() { None } else { Some(value) }
            }
            PersonalField::Title => info.title = value,
        }
    }

    pub fn update_summary(&mut self, text: impl Into<String>) {
        self.summary = text.into();
    }

    /// Appends an empty entry of the given kind and returns its fresh id.
    pub fn add_entry(&mut self, kind: EntryKind) -> String {
        let id = kind.new_id();
        match kind {
            EntryKind::Experience => self.experience.push(Experience {
                id: id.clone(),
                ..Default::default()
            }),
            EntryKind::Education => self.education.push(Education {
                id: id.clone(),
                ..Default::default()
            }),
            EntryKind::Course => self.courses.push(Course {
                id: id.clone(),
                ..Default::default()
            }),
        }
        debug!(kind = %kind, id = %id, "entry added");
        id
    }

    /// Removes the entry with `id`. Returns whether anything was removed; never fails.
    pub fn remove_entry(&mut self, kind: EntryKind, id: &str) -> bool {
        let removed = match kind {
            EntryKind::Experience => remove_by_id(&mut self.experience, id),
            EntryKind::Education => remove_by_id(&mut self.education, id),
            EntryKind::Course => remove_by_id(&mut self.courses, id),
        };
        if !removed {
            debug!(kind = %kind, id = %id, "remove of absent entry ignored");
        }
        removed
    }

    /// Replaces one field of the entry matching `id`.
    ///
    /// Returns `Ok(false)` when no entry has that id. Fails only when `field`
    /// is not a field of `kind` (e.g. `company` on a course).
    pub fn update_entry_field(
        &mut self,
        kind: EntryKind,
        id: &str,
        field: EntryField,
        value: impl Into<String>,
    ) -> Result<bool, CvError> {
        let slot = match kind {
            EntryKind::Experience => {
                experience_field(field).ok_or(CvError::FieldNotApplicable { kind, field })?;
                self.experience
                    .iter_mut()
                    .find(|e| e.id == id)
                    .and_then(|e| experience_slot(e, field))
            }
            EntryKind::Education => {
                education_field(field).ok_or(CvError::FieldNotApplicable { kind, field })?;
                self.education
                    .iter_mut()
                    .find(|e| e.id == id)
                    .and_then(|e| education_slot(e, field))
            }
            EntryKind::Course => {
                course_field(field).ok_or(CvError::FieldNotApplicable { kind, field })?;
                self.courses
                    .iter_mut()
                    .find(|c| c.id == id)
                    .and_then(|c| course_slot(c, field))
            }
        };

        match slot {
            Some(slot) => {
                *slot = value.into();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether an entry with `id` currently exists.
    pub fn has_entry(&self, kind: EntryKind, id: &str) -> bool {
        match kind {
            EntryKind::Experience => self.experience.iter().any(|e| e.id == id),
            EntryKind::Education => self.education.iter().any(|e| e.id == id),
            EntryKind::Course => self.courses.iter().any(|c| c.id == id),
        }
    }
}

trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Experience {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Education {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Course {
    fn id(&self) -> &str {
        &self.id
    }
}

fn remove_by_id<T: Identified>(entries: &mut Vec<T>, id: &str) -> bool {
    let before = entries.len();
    entries.retain(|e| e.id() != id);
    entries.len() != before
}

fn experience_field(field: EntryField) -> Option<EntryField> {
    matches!(
        field,
        EntryField::Company
            | EntryField::Role
            | EntryField::StartDate
            | EntryField::EndDate
            | EntryField::Description
    )
    .then_some(field)
}

fn education_field(field: EntryField) -> Option<EntryField> {
    matches!(
        field,
        EntryField::Institution
            | EntryField::Degree
            | EntryField::StartDate
            | EntryField::EndDate
            | EntryField::Description
    )
    .then_some(field)
}

fn course_field(field: EntryField) -> Option<EntryField> {
    matches!(
        field,
        EntryField::Name | EntryField::Institution | EntryField::Date
    )
    .then_some(field)
}

fn experience_slot(e: &mut Experience, field: EntryField) -> Option<&mut String> {
    match field {
        EntryField::Company => Some(&mut e.company),
        EntryField::Role => Some(&mut e.role),
        EntryField::StartDate => Some(&mut e.start_date),
        EntryField::EndDate => Some(&mut e.end_date),
        EntryField::Description => Some(&mut e.description),
        _ => None,
    }
}

fn education_slot(e: &mut Education, field: EntryField) -> Option<&mut String> {
    match field {
        EntryField::Institution => Some(&mut e.institution),
        EntryField::Degree => Some(&mut e.degree),
        EntryField::StartDate => Some(&mut e.start_date),
        EntryField::EndDate => Some(&mut e.end_date),
        EntryField::Description => Some(&mut e.description),
        _ => None,
    }
}

fn course_slot(c: &mut Course, field: EntryField) -> Option<&mut String> {
    match field {
        EntryField::Name => Some(&mut c.name),
        EntryField::Institution => Some(&mut c.institution),
        EntryField::Date => Some(&mut c.date),
        _ => None,
    }
}
