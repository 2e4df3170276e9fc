use crate::cv::CvError;
use crate::models::{CvData, SkillSet};

impl SkillSet {
    /// Appends `skill` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, skill: impl Into<String>) -> bool {
        let skill = skill.into();
        if self.contains(&skill) {
            return false;
        }
        self.inner_mut().push(skill);
        true
    }

    /// Removes `skill` if present. Returns whether it was removed.
    pub fn remove(&mut self, skill: &str) -> bool {
        let inner = self.inner_mut();
        let before = inner.len();
        inner.retain(|s| s != skill);
        inner.len() != before
    }

    /// Builds a set from `skills`, failing on the first duplicate.
    pub fn try_from_vec(skills: Vec<String>) -> Result<Self, CvError> {
        let mut set = SkillSet::default();
        for skill in skills {
            if set.contains(&skill) {
                return Err(CvError::DuplicateSkill(skill));
            }
            set.inner_mut().push(skill);
        }
        Ok(set)
    }
}

impl CvData {
    /// Replaces the skill set wholesale. A list containing duplicates is rejected
    /// and the current set is left untouched.
    pub fn set_skills(&mut self, skills: Vec<String>) -> Result<(), CvError> {
        self.skills = SkillSet::try_from_vec(skills)?;
        Ok(())
    }

    /// Adds one tag, trimmed. Blank or already-present tags are ignored.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() {
            return false;
        }
        self.skills.insert(skill)
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        self.skills.remove(skill)
    }
}
