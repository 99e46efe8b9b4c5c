//! Canonical resume shape, the "is this entry empty" predicate, and the
//! `normalize` boundary that upgrades legacy persisted shapes.
//!
//! Persisted JSON uses camelCase keys so values written by earlier versions
//! of the builder (`personalInfo`, `techStack`, `liveUrl`, ...) load as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("resume data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("resume data must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

// ────────────────────────────────────────────────────────────────────────────
// Canonical shape
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub live_url: String,
    pub github_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSet {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    Soft,
    Tools,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 3] = [
        SkillCategory::Technical,
        SkillCategory::Soft,
        SkillCategory::Tools,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::Technical => "Technical",
            SkillCategory::Soft => "Soft",
            SkillCategory::Tools => "Tools",
        }
    }
}

impl SkillSet {
    pub fn category(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::Technical => &self.technical,
            SkillCategory::Soft => &self.soft,
            SkillCategory::Tools => &self.tools,
        }
    }

    pub fn category_mut(&mut self, category: SkillCategory) -> &mut Vec<String> {
        match category {
            SkillCategory::Technical => &mut self.technical,
            SkillCategory::Soft => &mut self.soft,
            SkillCategory::Tools => &mut self.tools,
        }
    }

    /// Non-blank skills across every category.
    pub fn total(&self) -> usize {
        SkillCategory::ALL
            .iter()
            .flat_map(|c| self.category(*c))
            .filter(|s| !s.trim().is_empty())
            .count()
    }

    /// Adds `skill` to `category` unless it is blank or already present
    /// (case-insensitive). Returns true when the set changed.
    pub fn insert(&mut self, category: SkillCategory, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() {
            return false;
        }
        let bucket = self.category_mut(category);
        if bucket.iter().any(|s| s.trim().eq_ignore_ascii_case(skill)) {
            return false;
        }
        bucket.push(skill.to_string());
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Links {
    pub github: String,
    pub linkedin: String,
}

/// Root aggregate edited by a single builder session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeModel {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: SkillSet,
    pub links: Links,
}

impl Default for ResumeModel {
    /// Every sequence starts with one blank row so a form always has an input to show.
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            summary: String::new(),
            education: vec![EducationEntry::default()],
            experience: vec![ExperienceEntry::default()],
            projects: vec![ProjectEntry::default()],
            skills: SkillSet::default(),
            links: Links::default(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry emptiness
// ────────────────────────────────────────────────────────────────────────────

/// Textual view of a repeatable resume entry.
///
/// Entries are keyed on their string fields only: a project whose tech stack
/// is filled in but whose text fields are blank is still empty.
pub trait ResumeEntry {
    /// Every string-valued field of the entry.
    fn text_fields(&self) -> Vec<&str>;

    /// True when the row should be rendered. By default that is any
    /// non-empty text field.
    fn has_content(&self) -> bool {
        !is_entry_empty(self)
    }
}

/// True iff every string field of `entry` is blank after trimming.
pub fn is_entry_empty<E: ResumeEntry + ?Sized>(entry: &E) -> bool {
    entry.text_fields().iter().all(|f| f.trim().is_empty())
}

impl ResumeEntry for EducationEntry {
    fn text_fields(&self) -> Vec<&str> {
        vec![
            self.institution.as_str(),
            self.degree.as_str(),
            self.year.as_str(),
        ]
    }
}

impl ResumeEntry for ExperienceEntry {
    fn text_fields(&self) -> Vec<&str> {
        vec![
            self.company.as_str(),
            self.position.as_str(),
            self.duration.as_str(),
            self.description.as_str(),
        ]
    }

    /// A duration on its own is not enough to show an experience row.
    fn has_content(&self) -> bool {
        [&self.company, &self.position, &self.description]
            .iter()
            .any(|f| !f.trim().is_empty())
    }
}

impl ResumeEntry for ProjectEntry {
    fn text_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.live_url.as_str(),
            self.github_url.as_str(),
        ]
    }
}

impl ExperienceEntry {
    /// Company, position, and description are all filled in.
    pub fn is_complete(&self) -> bool {
        [&self.company, &self.position, &self.description]
            .iter()
            .all(|f| !f.trim().is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

/// Persisted resume of any known version. Every field is optional so that
/// partial documents still load; missing values become empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResume {
    #[serde(default)]
    personal_info: Option<RawPersonalInfo>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    education: Option<Vec<RawEducation>>,
    #[serde(default)]
    experience: Option<Vec<RawExperience>>,
    #[serde(default)]
    projects: Option<Vec<RawProject>>,
    #[serde(default)]
    skills: Option<RawSkills>,
    #[serde(default)]
    links: Option<RawLinks>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPersonalInfo {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawEducation {
    #[serde(default)]
    institution: Option<String>,
    #[serde(default)]
    degree: Option<String>,
    #[serde(default)]
    year: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawExperience {
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Union of the legacy `{name, description, link}` project and the current
/// `{title, description, techStack, liveUrl, githubUrl}` project.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tech_stack: Option<Vec<String>>,
    #[serde(default)]
    live_url: Option<String>,
    #[serde(default)]
    github_url: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSkills {
    Legacy(String),
    Structured {
        #[serde(default)]
        technical: Option<Vec<String>>,
        #[serde(default)]
        soft: Option<Vec<String>>,
        #[serde(default)]
        tools: Option<Vec<String>>,
    },
}

#[derive(Debug, Default, Deserialize)]
struct RawLinks {
    #[serde(default)]
    github: Option<String>,
    #[serde(default)]
    linkedin: Option<String>,
}

impl From<RawProject> for ProjectEntry {
    fn from(raw: RawProject) -> Self {
        let mut project = ProjectEntry {
            title: raw.title.or(raw.name).unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            tech_stack: raw
                .tech_stack
                .unwrap_or_default()
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            live_url: raw.live_url.unwrap_or_default(),
            github_url: raw.github_url.unwrap_or_default(),
        };

        // Legacy single link: GitHub URLs keep their meaning, anything else is the live URL.
        if let Some(link) = raw.link.filter(|l| !l.trim().is_empty()) {
            if link.to_ascii_lowercase().contains("github.com") {
                if project.github_url.trim().is_empty() {
                    project.github_url = link;
                }
            } else if project.live_url.trim().is_empty() {
                project.live_url = link;
            }
        }

        project
    }
}

impl From<RawSkills> for SkillSet {
    fn from(raw: RawSkills) -> Self {
        match raw {
            // The legacy comma-separated string lands in the technical bucket.
            RawSkills::Legacy(text) => SkillSet {
                technical: split_skill_list(&text),
                ..SkillSet::default()
            },
            RawSkills::Structured {
                technical,
                soft,
                tools,
            } => SkillSet {
                technical: clean_skills(technical.unwrap_or_default()),
                soft: clean_skills(soft.unwrap_or_default()),
                tools: clean_skills(tools.unwrap_or_default()),
            },
        }
    }
}

/// Splits a comma-separated skills string into trimmed, non-empty items.
pub fn split_skill_list(text: &str) -> Vec<String> {
    clean_skills(text.split(',').map(str::to_string).collect())
}

fn clean_skills(skills: Vec<String>) -> Vec<String> {
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn or_placeholder<T: Default>(mut entries: Vec<T>) -> Vec<T> {
    if entries.is_empty() {
        entries.push(T::default());
    }
    entries
}

impl ResumeModel {
    /// Upgrades a persisted value of any known shape into the canonical model.
    pub fn try_normalize(raw: &Value) -> Result<Self, ModelError> {
        if !raw.is_object() {
            return Err(ModelError::NotAnObject(json_kind(raw)));
        }
        let raw = RawResume::deserialize(raw)?;

        let personal = raw.personal_info.unwrap_or_default();
        let links = raw.links.unwrap_or_default();

        Ok(ResumeModel {
            personal_info: PersonalInfo {
                name: personal.name.unwrap_or_default(),
                email: personal.email.unwrap_or_default(),
                phone: personal.phone.unwrap_or_default(),
                location: personal.location.unwrap_or_default(),
            },
            summary: raw.summary.unwrap_or_default(),
            education: or_placeholder(
                raw.education
                    .unwrap_or_default()
                    .into_iter()
                    .map(|e| EducationEntry {
                        institution: e.institution.unwrap_or_default(),
                        degree: e.degree.unwrap_or_default(),
                        year: e.year.unwrap_or_default(),
                    })
                    .collect(),
            ),
            experience: or_placeholder(
                raw.experience
                    .unwrap_or_default()
                    .into_iter()
                    .map(|e| ExperienceEntry {
                        company: e.company.unwrap_or_default(),
                        position: e.position.unwrap_or_default(),
                        duration: e.duration.unwrap_or_default(),
                        description: e.description.unwrap_or_default(),
                    })
                    .collect(),
            ),
            projects: or_placeholder(
                raw.projects
                    .unwrap_or_default()
                    .into_iter()
                    .map(ProjectEntry::from)
                    .collect(),
            ),
            skills: raw.skills.map(SkillSet::from).unwrap_or_default(),
            links: Links {
                github: links.github.unwrap_or_default(),
                linkedin: links.linkedin.unwrap_or_default(),
            },
        })
    }

    /// Like [`ResumeModel::try_normalize`], but falls back to the default model
    /// when the value cannot be read.
    pub fn normalize(raw: &Value) -> Self {
        Self::try_normalize(raw).unwrap_or_else(|e| {
            warn!("Discarding unreadable resume data: {e}");
            Self::default()
        })
    }

    /// Parses persisted JSON text and normalizes it.
    pub fn from_json_str(text: &str) -> Result<Self, ModelError> {
        let value: Value = serde_json::from_str(text)?;
        Self::try_normalize(&value)
    }

    /// Complete example resume used by "load sample data".
    pub fn sample() -> Self {
        ResumeModel {
            personal_info: PersonalInfo {
                name: "Alex Johnson".to_string(),
                email: "alex.johnson@example.com".to_string(),
                phone: "(555) 123-4567".to_string(),
                location: "San Francisco, CA".to_string(),
            },
            summary: "Passionate software engineer with 5 years of experience developing \
                      scalable web applications. Built and launched products used by 200k people."
                .to_string(),
            education: vec![
                EducationEntry {
                    institution: "Stanford University".to_string(),
                    degree: "BS Computer Science".to_string(),
                    year: "2015-2019".to_string(),
                },
                EducationEntry {
                    institution: "City College".to_string(),
                    degree: "Associate Degree".to_string(),
                    year: "2013-2015".to_string(),
                },
            ],
            experience: vec![
                ExperienceEntry {
                    company: "Tech Innovations Inc.".to_string(),
                    position: "Senior Software Engineer".to_string(),
                    duration: "Jan 2021 - Present".to_string(),
                    description: "Led development of customer-facing applications using React \
                                  and Node.js, cutting page load time by 40%."
                        .to_string(),
                },
                ExperienceEntry {
                    company: "Digital Solutions LLC".to_string(),
                    position: "Software Developer".to_string(),
                    duration: "Jun 2019 - Dec 2020".to_string(),
                    description: "Built and maintained web applications using JavaScript, \
                                  React, and Python."
                        .to_string(),
                },
            ],
            projects: vec![
                ProjectEntry {
                    title: "E-commerce Platform".to_string(),
                    description: "Full-stack e-commerce solution with payment integration"
                        .to_string(),
                    tech_stack: vec!["Next.js".to_string(), "Stripe".to_string()],
                    live_url: "https://shop.example.com".to_string(),
                    github_url: "https://github.com/example/ecommerce".to_string(),
                },
                ProjectEntry {
                    title: "Task Management App".to_string(),
                    description: "Collaborative task management application with real-time \
                                  updates"
                        .to_string(),
                    tech_stack: vec!["React".to_string(), "WebSockets".to_string()],
                    live_url: String::new(),
                    github_url: "https://github.com/example/taskapp".to_string(),
                },
            ],
            skills: SkillSet {
                technical: vec![
                    "JavaScript".to_string(),
                    "React".to_string(),
                    "Node.js".to_string(),
                    "Python".to_string(),
                    "SQL".to_string(),
                ],
                soft: vec!["Mentoring".to_string()],
                tools: vec!["AWS".to_string(), "Docker".to_string()],
            },
            links: Links {
                github: "https://github.com/alexjohnson".to_string(),
                linkedin: "https://linkedin.com/in/alexjohnson".to_string(),
            },
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
