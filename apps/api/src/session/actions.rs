//! The closed set of edits a client can make to the resume, and the reducer
//! that applies them. Every action either mutates the model or fails without
//! touching it.

use serde::{Deserialize, Serialize};

use crate::models::{
    EducationEntry, ExperienceEntry, ProjectEntry, ResumeModel, SkillCategory,
};
use crate::session::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    Name,
    Email,
    Phone,
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    Institution,
    Degree,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceField {
    Company,
    Position,
    Duration,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectField {
    Title,
    Description,
    LiveUrl,
    GithubUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkField {
    Github,
    Linkedin,
}

/// Wire shape: `{"type": "update_experience", "index": 0, "field": "company", "value": "Acme"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResumeAction {
    SetPersonalField {
        field: PersonalField,
        value: String,
    },
    SetSummary {
        value: String,
    },
    AddEducation,
    UpdateEducation {
        index: usize,
        field: EducationField,
        value: String,
    },
    RemoveEducation {
        index: usize,
    },
    AddExperience,
    UpdateExperience {
        index: usize,
        field: ExperienceField,
        value: String,
    },
    RemoveExperience {
        index: usize,
    },
    AddProject,
    UpdateProject {
        index: usize,
        field: ProjectField,
        value: String,
    },
    SetProjectTechStack {
        index: usize,
        #[serde(rename = "techStack", alias = "tech_stack")]
        tech_stack: Vec<String>,
    },
    RemoveProject {
        index: usize,
    },
    AddSkill {
        category: SkillCategory,
        skill: String,
    },
    RemoveSkill {
        category: SkillCategory,
        skill: String,
    },
    SetSkills {
        category: SkillCategory,
        skills: Vec<String>,
    },
    SetLink {
        link: LinkField,
        value: String,
    },
    LoadSample,
    Reset,
}

/// Applies `action` to `model`. Out-of-range indices leave the model as it was.
pub fn apply(model: &mut ResumeModel, action: ResumeAction) -> Result<(), SessionError> {
    match action {
        ResumeAction::SetPersonalField { field, value } => {
            let info = &mut model.personal_info;
            let slot = match field {
                PersonalField::Name => &mut info.name,
                PersonalField::Email => &mut info.email,
                PersonalField::Phone => &mut info.phone,
                PersonalField::Location => &mut info.location,
            };
            *slot = value;
        }
        ResumeAction::SetSummary { value } => model.summary = value,

        ResumeAction::AddEducation => model.education.push(EducationEntry::default()),
        ResumeAction::UpdateEducation { index, field, value } => {
            let entry = entry_mut(&mut model.education, "education", index)?;
            let slot = match field {
                EducationField::Institution => &mut entry.institution,
                EducationField::Degree => &mut entry.degree,
                EducationField::Year => &mut entry.year,
            };
            *slot = value;
        }
        ResumeAction::RemoveEducation { index } => {
            remove_entry(&mut model.education, "education", index)?
        }

        ResumeAction::AddExperience => model.experience.push(ExperienceEntry::default()),
        ResumeAction::UpdateExperience { index, field, value } => {
            let entry = entry_mut(&mut model.experience, "experience", index)?;
            let slot = match field {
                ExperienceField::Company => &mut entry.company,
                ExperienceField::Position => &mut entry.position,
                ExperienceField::Duration => &mut entry.duration,
                ExperienceField::Description => &mut entry.description,
            };
            *slot = value;
        }
        ResumeAction::RemoveExperience { index } => {
            remove_entry(&mut model.experience, "experience", index)?
        }

        ResumeAction::AddProject => model.projects.push(ProjectEntry::default()),
        ResumeAction::UpdateProject { index, field, value } => {
            let entry = entry_mut(&mut model.projects, "projects", index)?;
            let slot = match field {
                ProjectField::Title => &mut entry.title,
                ProjectField::Description => &mut entry.description,
                ProjectField::LiveUrl => &mut entry.live_url,
                ProjectField::GithubUrl => &mut entry.github_url,
            };
            *slot = value;
        }
        ResumeAction::SetProjectTechStack { index, tech_stack } => {
            let entry = entry_mut(&mut model.projects, "projects", index)?;
            entry.tech_stack = tech_stack
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
        }
        ResumeAction::RemoveProject { index } => {
            remove_entry(&mut model.projects, "projects", index)?
        }

        ResumeAction::AddSkill { category, skill } => {
            model.skills.insert(category, &skill);
        }
        ResumeAction::RemoveSkill { category, skill } => {
            let skill = skill.trim();
            model
                .skills
                .category_mut(category)
                .retain(|s| !s.trim().eq_ignore_ascii_case(skill));
        }
        ResumeAction::SetSkills { category, skills } => {
            model.skills.category_mut(category).clear();
            for skill in &skills {
                model.skills.insert(category, skill);
            }
        }

        ResumeAction::SetLink { link, value } => match link {
            LinkField::Github => model.links.github = value,
            LinkField::Linkedin => model.links.linkedin = value,
        },

        ResumeAction::LoadSample => *model = ResumeModel::sample(),
        ResumeAction::Reset => *model = ResumeModel::default(),
    }
    Ok(())
}

fn entry_mut<'a, E>(
    entries: &'a mut [E],
    section: &'static str,
    index: usize,
) -> Result<&'a mut E, SessionError> {
    let len = entries.len();
    entries
        .get_mut(index)
        .ok_or(SessionError::IndexOutOfRange { section, index, len })
}

/// Removing the only entry leaves a fresh blank one in its place.
fn remove_entry<E: Default>(
    entries: &mut Vec<E>,
    section: &'static str,
    index: usize,
) -> Result<(), SessionError> {
    if index >= entries.len() {
        return Err(SessionError::IndexOutOfRange {
            section,
            index,
            len: entries.len(),
        });
    }
    entries.remove(index);
    if entries.is_empty() {
        entries.push(E::default());
    }
    Ok(())
}
