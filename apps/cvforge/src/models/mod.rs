pub mod cv;

pub use cv::{
    Course, CvData, Education, EntryField, EntryKind, Experience, LayoutKind, PersonalField,
    PersonalInfo, SkillSet, PRESENT,
};
