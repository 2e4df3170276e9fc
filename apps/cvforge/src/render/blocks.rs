// Building blocks shared by both layouts.

use crate::models::{CvData, PersonalInfo};
use crate::render::{
    Block, ContactItem, ContactKind, ContactStyle, EntryView, Header, Section, SectionBody,
    SectionKind,
};

/// Splits a multi-line description into bullet items: one per non-blank line, in order.
pub fn description_bullets(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub(super) fn header(info: &PersonalInfo, contact_style: ContactStyle) -> Block {
    Block::Header(Header {
        photo: info.photo.clone().filter(|p| !p.is_empty()),
        name: info.name.clone(),
        title: info.title.clone(),
        contacts: contacts(info),
        contact_style,
    })
}

/// Non-blank contact fields in canonical order.
pub(super) fn contacts(info: &PersonalInfo) -> Vec<ContactItem> {
    let candidates = [
        (ContactKind::Email, info.email.as_str()),
        (ContactKind::Phone, info.phone.as_str()),
        (ContactKind::Address, info.address.as_str()),
        (ContactKind::Linkedin, info.linkedin.as_str()),
        (ContactKind::Github, info.github.as_str()),
        (ContactKind::Website, info.website.as_deref().unwrap_or("")),
    ];

    candidates
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(kind, value)| ContactItem {
            kind,
            text: value.to_string(),
            href: contact_href(kind, value),
        })
        .collect()
}

fn contact_href(kind: ContactKind, value: &str) -> Option<String> {
    match kind {
        ContactKind::Email => Some(format!("mailto:{value}")),
        ContactKind::Linkedin | ContactKind::Github | ContactKind::Website => {
            if value.starts_with("http://") || value.starts_with("https://") {
                Some(value.to_string())
            } else {
                Some(format!("https://{value}"))
            }
        }
        ContactKind::Phone | ContactKind::Address => None,
    }
}

fn section(kind: SectionKind, body: SectionBody) -> Block {
    Block::Section(Section {
        kind,
        title: kind.title().to_string(),
        body,
    })
}

fn date_range(start: &str, end: &str) -> String {
    match (start.trim().is_empty(), end.trim().is_empty()) {
        (false, false) => format!("{start} - {end}"),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (true, true) => String::new(),
    }
}

pub(super) fn summary(cv: &CvData) -> Option<Block> {
    if cv.summary.trim().is_empty() {
        return None;
    }
    Some(section(
        SectionKind::Summary,
        SectionBody::Paragraph(cv.summary.clone()),
    ))
}

pub(super) fn experience(cv: &CvData) -> Option<Block> {
    if cv.experience.is_empty() {
        return None;
    }
    let entries = cv
        .experience
        .iter()
        .map(|e| EntryView {
            id: e.id.clone(),
            heading: e.role.clone(),
            subheading: e.company.clone(),
            dates: date_range(&e.start_date, &e.end_date),
            bullets: description_bullets(&e.description),
        })
        .collect();
    Some(section(SectionKind::Experience, SectionBody::Entries(entries)))
}

pub(super) fn education(cv: &CvData) -> Option<Block> {
    if cv.education.is_empty() {
        return None;
    }
    let entries = cv
        .education
        .iter()
        .map(|e| EntryView {
            id: e.id.clone(),
            heading: e.institution.clone(),
            subheading: e.degree.clone(),
            dates: date_range(&e.start_date, &e.end_date),
            bullets: description_bullets(&e.description),
        })
        .collect();
    Some(section(SectionKind::Education, SectionBody::Entries(entries)))
}

pub(super) fn courses(cv: &CvData) -> Option<Block> {
    if cv.courses.is_empty() {
        return None;
    }
    let entries = cv
        .courses
        .iter()
        .map(|c| EntryView {
            id: c.id.clone(),
            heading: c.name.clone(),
            subheading: c.institution.clone(),
            dates: c.date.clone(),
            bullets: Vec::new(),
        })
        .collect();
    Some(section(SectionKind::Courses, SectionBody::Entries(entries)))
}

pub(super) fn skills(cv: &CvData) -> Option<Block> {
    if cv.skills.is_empty() {
        return None;
    }
    Some(section(
        SectionKind::Skills,
        SectionBody::Chips(cv.skills.iter().cloned().collect()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullets_drop_blank_lines_and_keep_order() {
        let text = "\n first \n\n   \nsecond\r\nthird\n\n";
        assert_eq!(description_bullets(text), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_bullet_count_matches_non_blank_lines() {
        let lines = ["a", "", "b", "  ", "c", "", "", "d"];
        let text = lines.join("\n");
        let non_blank = lines.iter().filter(|l| !l.trim().is_empty()).count();
        assert_eq!(description_bullets(&text).len(), non_blank);
    }

    #[test]
    fn test_empty_description_has_no_bullets() {
        assert!(description_bullets("").is_empty());
        assert!(description_bullets("\n\n").is_empty());
    }

    #[test]
    fn test_contacts_canonical_order_and_omission() {
        let info = PersonalInfo {
            github: "github.com/x".to_string(),
            email: "x@example.com".to_string(),
            website: Some("x.dev".to_string()),
            ..Default::default()
        };
        let kinds: Vec<ContactKind> = contacts(&info).iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ContactKind::Email, ContactKind::Github, ContactKind::Website]
        );
    }

    #[test]
    fn test_contact_hrefs() {
        let info = PersonalInfo {
            email: "x@example.com".to_string(),
            phone: "555".to_string(),
            linkedin: "linkedin.com/in/x".to_string(),
            website: Some("https://x.dev".to_string()),
            ..Default::default()
        };
        let items = contacts(&info);
        assert_eq!(items[0].href.as_deref(), Some("mailto:x@example.com"));
        assert_eq!(items[1].href, None);
        assert_eq!(items[2].href.as_deref(), Some("https://linkedin.com/in/x"));
        assert_eq!(items[3].href.as_deref(), Some("https://x.dev"));
    }

    #[test]
    fn test_date_range_formats() {
        assert_eq!(date_range("2020-01", "Present"), "2020-01 - Present");
        assert_eq!(date_range("2020-01", ""), "2020-01");
        assert_eq!(date_range("", "2021"), "2021");
        assert_eq!(date_range("", ""), "");
    }
}
