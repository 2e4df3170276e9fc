use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel end date for a position that is still held.
pub const PRESENT: &str = "Present";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub linkedin: String,
    pub github: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub title: String,
    /// Embedded image as a `data:<mime>;base64,...` URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub role: String,
    pub start_date: String,
    /// Free text, or [`PRESENT`].
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub institution: String,
    pub date: String,
}

/// Ordered, duplicate-free list of skill tags. Comparison is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.iter().any(|s| s == skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub(crate) fn inner_mut(&mut self) -> &mut Vec<String> {
        &mut self.0
    }
}

/// The aggregate root for one résumé. Owned by the session; the renderer only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvData {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub courses: Vec<Course>,
    pub skills: SkillSet,
}

// ────────────────────────────────────────────────────────────────────────────
// Selectors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Experience,
    Education,
    Course,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Experience => "experience",
            EntryKind::Education => "education",
            EntryKind::Course => "course",
        }
    }

    /// Inverse of [`EntryKind::as_str`].
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "experience" => Some(EntryKind::Experience),
            "education" => Some(EntryKind::Education),
            "course" => Some(EntryKind::Course),
            _ => None,
        }
    }

    /// Prefix used for generated entry ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            EntryKind::Experience => "exp",
            EntryKind::Education => "edu",
            EntryKind::Course => "course",
        }
    }

    pub fn new_id(&self) -> String {
        format!("{}-{}", self.id_prefix(), Uuid::new_v4())
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar fields of [`PersonalInfo`]. The photo is set through its own operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    Name,
    Email,
    Phone,
    Address,
    Linkedin,
    Github,
    Website,
    Title,
}

/// Union of all entry fields. Each [`EntryKind`] accepts only its own subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryField {
    Company,
    Role,
    Institution,
    Degree,
    Name,
    StartDate,
    EndDate,
    Date,
    Description,
}

impl std::fmt::Display for EntryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntryField::Company => "company",
            EntryField::Role => "role",
            EntryField::Institution => "institution",
            EntryField::Degree => "degree",
            EntryField::Name => "name",
            EntryField::StartDate => "startDate",
            EntryField::EndDate => "endDate",
            EntryField::Date => "date",
            EntryField::Description => "description",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    #[default]
    Classic,
    Modern,
}

// ────────────────────────────────────────────────────────────────────────────
// Session-start content
// ────────────────────────────────────────────────────────────────────────────

impl CvData {
    /// Placeholder record shown when a session starts.
    pub fn sample() -> Self {
        CvData {
            personal_info: PersonalInfo {
                name: "Jane Doe".to_string(),
                email: "jane.doe@example.com".to_string(),
                phone: "123-456-7890".to_string(),
                address: "123 Main St, Anytown, USA".to_string(),
                linkedin: "linkedin.com/in/janedoe".to_string(),
                github: "github.com/janedoe".to_string(),
                website: Some("yourportfolio.com".to_string()),
                title: "Senior Software Engineer".to_string(),
                photo: None,
            },
            summary: "A highly motivated and experienced software engineer with a passion for \
                creating efficient and scalable web applications. Proficient in various \
                programming languages and frameworks."
                .to_string(),
            experience: vec![Experience {
                id: EntryKind::Experience.new_id(),
                company: "Tech Solutions Inc.".to_string(),
                role: "Software Engineer".to_string(),
                start_date: "2020-01".to_string(),
                end_date: PRESENT.to_string(),
                description: "Developed and maintained web applications using React and Node.js.\n\
                    Collaborated with cross-functional teams to deliver high-quality software products.\n\
                    Implemented new features and optimized existing code for performance."
                    .to_string(),
            }],
            education: vec![Education {
                id: EntryKind::Education.new_id(),
                institution: "University of Technology".to_string(),
                degree: "Bachelor of Science in Computer Science".to_string(),
                start_date: "2016-09".to_string(),
                end_date: "2020-05".to_string(),
                description: "Graduated with honors. Relevant coursework: Data Structures, \
                    Algorithms, Web Development."
                    .to_string(),
            }],
            courses: vec![Course {
                id: EntryKind::Course.new_id(),
                name: "Advanced React Patterns".to_string(),
                institution: "Online Platform".to_string(),
                date: "2023".to_string(),
            }],
            skills: SkillSet(
                ["React", "TypeScript", "Node.js", "Python", "SQL", "Docker", "AWS"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
        }
    }
}
