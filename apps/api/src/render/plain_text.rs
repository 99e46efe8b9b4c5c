//! Plain-text export used for clipboard copy. Unlike the preview, blank fields
//! are dropped entirely and no placeholder text is ever written.

use serde::{Deserialize, Serialize};

use crate::engine::{Section, SectionVisibility};
use crate::models::{ResumeEntry, ResumeModel, SkillCategory};

pub const INCOMPLETE_WARNING: &str =
    "Your resume may look incomplete. Add your name and at least one experience or project entry.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainTextExport {
    pub text: String,
    /// Advisory only; never blocks the export.
    pub warnings: Vec<String>,
}

pub fn export_plain_text(model: &ResumeModel) -> PlainTextExport {
    let visibility = SectionVisibility::from_model(model);
    PlainTextExport {
        text: to_plain_text(model, &visibility),
        warnings: completeness_warnings(model, &visibility),
    }
}

/// Flags a resume missing a name, or with neither experience nor projects.
pub fn completeness_warnings(model: &ResumeModel, visibility: &SectionVisibility) -> Vec<String> {
    let missing_name = model.personal_info.name.trim().is_empty();
    let nothing_to_show = !visibility.experience && !visibility.projects;
    if missing_name || nothing_to_show {
        vec![INCOMPLETE_WARNING.to_string()]
    } else {
        Vec::new()
    }
}

pub fn to_plain_text(model: &ResumeModel, visibility: &SectionVisibility) -> String {
    let info = &model.personal_info;
    let mut blocks: Vec<String> = Vec::new();

    let header = lines(&[&info.name, &info.email, &info.phone, &info.location]);
    if !header.is_empty() {
        blocks.push(header.join("\n"));
    }

    if visibility.summary {
        blocks.push(format!("{}\n{}", Section::Summary.heading(), model.summary.trim()));
    }

    if visibility.education {
        let entries = model
            .education
            .iter()
            .filter(|e| e.has_content())
            .map(|e| lines(&[&e.institution, &e.degree, &e.year]).join("\n"));
        blocks.push(entry_block(Section::Education, entries));
    }

    if visibility.experience {
        let entries = model
            .experience
            .iter()
            .filter(|e| e.has_content())
            .map(|e| lines(&[&e.position, &e.company, &e.duration, &e.description]).join("\n"));
        blocks.push(entry_block(Section::Experience, entries));
    }

    if visibility.projects {
        let entries = model.projects.iter().filter(|p| p.has_content()).map(|p| {
            let mut entry = lines(&[&p.title, &p.description]);
            if !p.live_url.trim().is_empty() {
                entry.push(format!("Live: {}", p.live_url.trim()));
            }
            if !p.github_url.trim().is_empty() {
                entry.push(format!("GitHub: {}", p.github_url.trim()));
            }
            entry.join("\n")
        });
        blocks.push(entry_block(Section::Projects, entries));
    }

    if visibility.skills {
        let mut block = vec![Section::Skills.heading().to_string()];
        for category in SkillCategory::ALL {
            let items: Vec<&str> = model
                .skills
                .category(category)
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect();
            if !items.is_empty() {
                block.push(format!("{}: {}", category.label(), items.join(", ")));
            }
        }
        blocks.push(block.join("\n"));
    }

    if visibility.links {
        let mut block = vec![Section::Links.heading().to_string()];
        if !model.links.github.trim().is_empty() {
            block.push(format!("GitHub: {}", model.links.github.trim()));
        }
        if !model.links.linkedin.trim().is_empty() {
            block.push(format!("LinkedIn: {}", model.links.linkedin.trim()));
        }
        blocks.push(block.join("\n"));
    }

    let mut text = blocks.join("\n\n");
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

fn lines(fields: &[&String]) -> Vec<String> {
    fields
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

fn entry_block(section: Section, entries: impl Iterator<Item = String>) -> String {
    let body: Vec<String> = entries.collect();
    format!("{}\n{}", section.heading(), body.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationEntry, ExperienceEntry, ProjectEntry};

    #[test]
    fn test_empty_model_exports_nothing_and_warns() {
        let export = export_plain_text(&ResumeModel::default());
        assert_eq!(export.text, "");
        assert_eq!(export.warnings, vec![INCOMPLETE_WARNING.to_string()]);
    }

    #[test]
    fn test_full_export_layout() {
        let mut model = ResumeModel {
            summary: "Backend engineer.".to_string(),
            education: vec![
                EducationEntry {
                    institution: "MIT".to_string(),
                    degree: "BS".to_string(),
                    year: "2019".to_string(),
                },
                EducationEntry::default(),
            ],
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                position: "Engineer".to_string(),
                duration: String::new(),
                description: "Built 3 services".to_string(),
            }],
            projects: vec![ProjectEntry {
                title: "Engine".to_string(),
                description: "Rules engine".to_string(),
                tech_stack: vec!["Rust".to_string()],
                live_url: String::new(),
                github_url: "https://github.com/j/engine".to_string(),
            }],
            ..ResumeModel::default()
        };
        model.personal_info.name = "Jane Doe".to_string();
        model.personal_info.email = "jane@x.com".to_string();
        model.skills.technical = vec!["Rust".to_string(), "Go".to_string()];
        model.skills.tools = vec!["Git".to_string()];
        model.links.linkedin = "https://linkedin.com/in/jane".to_string();

        let export = export_plain_text(&model);
        let expected = "\
Jane Doe
jane@x.com

SUMMARY
Backend engineer.

EDUCATION
MIT
BS
2019

EXPERIENCE
Engineer
Acme
Built 3 services

PROJECTS
Engine
Rules engine
GitHub: https://github.com/j/engine

SKILLS
Technical: Rust, Go
Tools: Git

LINKS
LinkedIn: https://linkedin.com/in/jane
";
        assert_eq!(export.text, expected);
        assert!(export.warnings.is_empty());
    }

    #[test]
    fn test_entries_are_blank_line_separated() {
        let model = ResumeModel {
            education: vec![
                EducationEntry {
                    institution: "A".to_string(),
                    ..EducationEntry::default()
                },
                EducationEntry {
                    institution: "B".to_string(),
                    ..EducationEntry::default()
                },
            ],
            ..ResumeModel::default()
        };
        let text = to_plain_text(&model, &SectionVisibility::from_model(&model));
        assert_eq!(text, "EDUCATION\nA\n\nB\n");
    }

    #[test]
    fn test_no_placeholder_text_in_export() {
        let model = ResumeModel {
            projects: vec![ProjectEntry {
                title: "Foo".to_string(),
                ..ProjectEntry::default()
            }],
            ..ResumeModel::default()
        };
        let export = export_plain_text(&model);
        assert_eq!(export.text, "PROJECTS\nFoo\n");
        assert!(!export.text.contains("Your Name"));
        // a project is present but the name is not
        assert_eq!(export.warnings.len(), 1);
    }

    #[test]
    fn test_named_resume_with_project_has_no_warning() {
        let mut model = ResumeModel {
            projects: vec![ProjectEntry {
                title: "Foo".to_string(),
                ..ProjectEntry::default()
            }],
            ..ResumeModel::default()
        };
        model.personal_info.name = "Jane".to_string();
        assert!(export_plain_text(&model).warnings.is_empty());
    }
}
