use serde::{Deserialize, Serialize};

use crate::models::{ResumeEntry, ResumeModel};

/// A resume section whose presence is derived from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Education,
    Experience,
    Projects,
    Skills,
    Links,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Summary,
        Section::Education,
        Section::Experience,
        Section::Projects,
        Section::Skills,
        Section::Links,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            Section::Summary => "SUMMARY",
            Section::Education => "EDUCATION",
            Section::Experience => "EXPERIENCE",
            Section::Projects => "PROJECTS",
            Section::Skills => "SKILLS",
            Section::Links => "LINKS",
        }
    }
}

/// Per-section visibility flags. A hidden section is left out of every output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionVisibility {
    pub summary: bool,
    pub education: bool,
    pub experience: bool,
    pub projects: bool,
    pub skills: bool,
    pub links: bool,
}

impl SectionVisibility {
    pub fn from_model(model: &ResumeModel) -> Self {
        Self {
            summary: !model.summary.trim().is_empty(),
            education: any_content(&model.education),
            experience: any_content(&model.experience),
            projects: any_content(&model.projects),
            skills: model.skills.total() > 0,
            links: !model.links.github.trim().is_empty()
                || !model.links.linkedin.trim().is_empty(),
        }
    }

    pub fn is_visible(&self, section: Section) -> bool {
        match section {
            Section::Summary => self.summary,
            Section::Education => self.education,
            Section::Experience => self.experience,
            Section::Projects => self.projects,
            Section::Skills => self.skills,
            Section::Links => self.links,
        }
    }

    pub fn visible_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| self.is_visible(*s))
            .collect()
    }
}

fn any_content<E: ResumeEntry>(entries: &[E]) -> bool {
    entries.iter().any(ResumeEntry::has_content)
}
