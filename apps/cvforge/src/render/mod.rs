//! Layout renderer — maps a [`CvData`] onto a structured visual document.
//!
//! `render` is pure and deterministic: the same record and layout always produce a
//! structurally equal [`VisualDocument`]. Sections whose source list or text is empty
//! are left out entirely; no empty headings are emitted.

mod blocks;
mod classic;
pub mod handlers;
mod modern;

use serde::{Deserialize, Serialize};

use crate::models::{CvData, LayoutKind};

pub use blocks::description_bullets;

// ────────────────────────────────────────────────────────────────────────────
// View types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualDocument {
    pub layout: LayoutKind,
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionRole {
    Main,
    Sidebar,
}

/// A vertical column of blocks. Regions are laid out left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub role: RegionRole,
    /// Share of the document width, in (0, 1].
    pub width_fraction: f32,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header(Header),
    Section(Section),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStyle {
    /// One wrapping row under the title.
    Inline,
    /// One contact per line.
    Stacked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub photo: Option<String>,
    pub name: String,
    pub title: String,
    pub contacts: Vec<ContactItem>,
    pub contact_style: ContactStyle,
}

/// Contact kinds in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Email,
    Phone,
    Address,
    Linkedin,
    Github,
    Website,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactItem {
    pub kind: ContactKind,
    pub text: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Courses,
    Skills,
}

impl SectionKind {
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Summary => "Summary",
            SectionKind::Experience => "Work Experience",
            SectionKind::Education => "Education",
            SectionKind::Courses => "Courses & Certifications",
            SectionKind::Skills => "Skills",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum SectionBody {
    Paragraph(String),
    Entries(Vec<EntryView>),
    Chips(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryView {
    pub id: String,
    pub heading: String,
    pub subheading: String,
    pub dates: String,
    pub bullets: Vec<String>,
}

impl VisualDocument {
    #[cfg(test)]
    pub fn region(&self, role: RegionRole) -> Option<&Region> {
        self.regions.iter().find(|r| r.role == role)
    }

    /// All sections across regions, in region then block order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.regions.iter().flat_map(|r| r.blocks.iter()).filter_map(|b| match b {
            Block::Section(s) => Some(s),
            Block::Header(_) => None,
        })
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections().find(|s| s.kind == kind)
    }

    pub fn header(&self) -> Option<&Header> {
        self.regions
            .iter()
            .flat_map(|r| r.blocks.iter())
            .find_map(|b| match b {
                Block::Header(h) => Some(h),
                Block::Section(_) => None,
            })
    }

    /// True when there is nothing to capture.
    pub fn is_empty(&self) -> bool {
        self.regions.iter().all(|r| r.blocks.is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

pub fn render(cv: &CvData, layout: LayoutKind) -> VisualDocument {
    let regions = match layout {
        LayoutKind::Classic => classic::regions(cv),
        LayoutKind::Modern => modern::regions(cv),
    };
    VisualDocument { layout, regions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryField, EntryKind, PersonalField};

    fn cv_with_one_experience(description: &str) -> CvData {
        let mut cv = CvData::default();
        let id = cv.add_entry(EntryKind::Experience);
        cv.update_entry_field(EntryKind::Experience, &id, EntryField::Description, description)
            .unwrap();
        cv
    }

    #[test]
    fn test_render_is_deterministic() {
        let cv = CvData::sample();
        for layout in [LayoutKind::Classic, LayoutKind::Modern] {
            assert_eq!(render(&cv, layout), render(&cv, layout));
        }
    }

    #[test]
    fn test_description_with_blank_line_yields_two_bullets() {
        let cv = cv_with_one_experience("Built X.\n\nShipped Y.");
        for layout in [LayoutKind::Classic, LayoutKind::Modern] {
            let doc = render(&cv, layout);
            let section = doc.section(SectionKind::Experience).unwrap();
            let SectionBody::Entries(entries) = &section.body else {
                panic!("experience body should be entries");
            };
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].bullets, vec!["Built X.", "Shipped Y."]);
        }
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let mut cv = CvData::default();
        cv.update_personal_field(PersonalField::Name, "Ann");
        for layout in [LayoutKind::Classic, LayoutKind::Modern] {
            let doc = render(&cv, layout);
            assert_eq!(doc.sections().count(), 0, "{layout:?}");
            assert_eq!(doc.header().unwrap().name, "Ann");
        }
    }

    #[test]
    fn test_whitespace_summary_is_omitted() {
        let mut cv = CvData::sample();
        cv.update_summary("  \n ");
        let doc = render(&cv, LayoutKind::Classic);
        assert!(doc.section(SectionKind::Summary).is_none());
    }

    #[test]
    fn test_classic_section_order() {
        let doc = render(&CvData::sample(), LayoutKind::Classic);
        assert_eq!(doc.regions.len(), 1);
        let kinds: Vec<SectionKind> = doc.sections().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Summary,
                SectionKind::Experience,
                SectionKind::Education,
                SectionKind::Courses,
                SectionKind::Skills,
            ]
        );
        assert!(matches!(doc.regions[0].blocks[0], Block::Header(_)));
    }

    #[test]
    fn test_modern_splits_sidebar_and_main() {
        let doc = render(&CvData::sample(), LayoutKind::Modern);
        let sidebar = doc.region(RegionRole::Sidebar).unwrap();
        let main = doc.region(RegionRole::Main).unwrap();
        assert!(matches!(sidebar.blocks[0], Block::Header(_)));

        let side_kinds: Vec<SectionKind> = sidebar
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Section(s) => Some(s.kind),
                _ => None,
            })
            .collect();
        assert_eq!(side_kinds, vec![SectionKind::Summary, SectionKind::Skills]);

        let main_kinds: Vec<SectionKind> = main
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Section(s) => Some(s.kind),
                _ => None,
            })
            .collect();
        assert_eq!(
            main_kinds,
            vec![SectionKind::Experience, SectionKind::Education, SectionKind::Courses]
        );
        let total: f32 = doc.regions.iter().map(|r| r.width_fraction).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_modern_main_region_kept_when_empty() {
        let mut cv = CvData::sample();
        cv.experience.clear();
        cv.education.clear();
        cv.courses.clear();
        let doc = render(&cv, LayoutKind::Modern);
        let main = doc.region(RegionRole::Main).unwrap();
        assert!(main.blocks.is_empty());
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut cv = CvData::default();
        let first = cv.add_entry(EntryKind::Course);
        let second = cv.add_entry(EntryKind::Course);
        cv.update_entry_field(EntryKind::Course, &first, EntryField::Name, "Zeta")
            .unwrap();
        cv.update_entry_field(EntryKind::Course, &second, EntryField::Name, "Alpha")
            .unwrap();
        let doc = render(&cv, LayoutKind::Classic);
        let SectionBody::Entries(entries) = &doc.section(SectionKind::Courses).unwrap().body
        else {
            panic!("courses body should be entries");
        };
        let headings: Vec<&str> = entries.iter().map(|e| e.heading.as_str()).collect();
        assert_eq!(headings, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_visual_document_serializes_tagged_blocks() {
        let doc = render(&CvData::sample(), LayoutKind::Classic);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["layout"], "classic");
        assert_eq!(json["regions"][0]["blocks"][0]["type"], "header");
        assert_eq!(json["regions"][0]["blocks"][1]["body"]["type"], "paragraph");
    }
}
