//! Resume preview. Maps a model plus a template/theme selection to a
//! presentation tree. Stateless: the same inputs always produce the same tree.
//!
//! Hidden sections are omitted from the tree entirely. Inside a visible section,
//! rows without content are skipped and partially filled rows show placeholder
//! text for their blank fields.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::engine::{Section, SectionVisibility};
use crate::models::{
    EducationEntry, ExperienceEntry, ProjectEntry, ResumeEntry, ResumeModel, SkillCategory,
};
use crate::render::template::{ColorTheme, TemplateName};

pub const NAME_PLACEHOLDER: &str = "Your Name";

// ────────────────────────────────────────────────────────────────────────────
// Presentation tree
// ────────────────────────────────────────────────────────────────────────────

/// A displayed value; `placeholder` is true when the model field was blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedField {
    pub text: String,
    pub placeholder: bool,
}

impl RenderedField {
    fn or_placeholder(value: &str, placeholder: &str) -> Self {
        if value.trim().is_empty() {
            Self {
                text: placeholder.to_string(),
                placeholder: true,
            }
        } else {
            Self {
                text: value.to_string(),
                placeholder: false,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkLine {
    pub label: String,
    pub url: String,
}

/// Name plus whichever contact details are filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: RenderedField,
    pub contact: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub identity: Identity,
    /// Empty unless the links section is visible.
    pub links: Vec<LinkLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationItem {
    pub institution: RenderedField,
    pub degree: RenderedField,
    pub year: RenderedField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub position: RenderedField,
    pub company: RenderedField,
    pub duration: RenderedField,
    pub description: RenderedField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub title: RenderedField,
    pub description: RenderedField,
    pub tech_stack: Vec<String>,
    pub live_url: RenderedField,
    pub github_url: RenderedField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub label: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionContent {
    Summary { text: String },
    Education { entries: Vec<EducationItem> },
    Experience { entries: Vec<ExperienceItem> },
    Projects { entries: Vec<ProjectItem> },
    Skills { groups: Vec<SkillGroup> },
    Links { links: Vec<LinkLine> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedSection {
    pub section: Section,
    pub title: String,
    pub content: SectionContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sidebar {
    pub identity: Identity,
    pub sections: Vec<RenderedSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum Layout {
    SingleColumn {
        header: Header,
        sections: Vec<RenderedSection>,
    },
    TwoColumn {
        sidebar: Sidebar,
        main: Vec<RenderedSection>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    Sans,
    Serif,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderAlignment {
    Center,
    Left,
}

/// Styling tokens a front end maps onto its own CSS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleTokens {
    pub font_family: FontFamily,
    pub header_alignment: HeaderAlignment,
    pub uppercase_headings: bool,
    pub tracked_headings: bool,
    pub heading_color: String,
    pub sidebar_background: Option<String>,
}

impl StyleTokens {
    fn for_template(template: TemplateName, theme: ColorTheme) -> Self {
        let accent = theme.accent_color().to_string();
        match template {
            TemplateName::Classic => Self {
                font_family: FontFamily::Sans,
                header_alignment: HeaderAlignment::Center,
                uppercase_headings: false,
                tracked_headings: false,
                heading_color: accent,
                sidebar_background: None,
            },
            TemplateName::Minimal => Self {
                font_family: FontFamily::Serif,
                header_alignment: HeaderAlignment::Center,
                uppercase_headings: true,
                tracked_headings: true,
                heading_color: accent,
                sidebar_background: None,
            },
            TemplateName::Modern => Self {
                font_family: FontFamily::Sans,
                header_alignment: HeaderAlignment::Left,
                uppercase_headings: false,
                tracked_headings: false,
                heading_color: accent.clone(),
                sidebar_background: Some(accent),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedResume {
    pub template: TemplateName,
    pub theme: ColorTheme,
    pub accent_color: String,
    pub style: StyleTokens,
    #[serde(flatten)]
    pub layout: Layout,
}

impl RenderedResume {
    /// Sections present anywhere in the tree, including header links.
    pub fn visible_sections(&self) -> BTreeSet<Section> {
        let mut sections = BTreeSet::new();
        match &self.layout {
            Layout::SingleColumn { header, sections: body } => {
                if !header.links.is_empty() {
                    sections.insert(Section::Links);
                }
                sections.extend(body.iter().map(|s| s.section));
            }
            Layout::TwoColumn { sidebar, main } => {
                sections.extend(sidebar.sections.iter().map(|s| s.section));
                sections.extend(main.iter().map(|s| s.section));
            }
        }
        sections
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Renders with visibility computed from the model.
pub fn render(model: &ResumeModel, template: TemplateName, theme: ColorTheme) -> RenderedResume {
    render_with_visibility(model, &SectionVisibility::from_model(model), template, theme)
}

/// Renders using visibility flags already derived for this model.
pub fn render_with_visibility(
    model: &ResumeModel,
    visibility: &SectionVisibility,
    template: TemplateName,
    theme: ColorTheme,
) -> RenderedResume {
    let layout = match template {
        TemplateName::Modern => {
            let sidebar_sections = [Section::Links, Section::Skills];
            let main_sections = [
                Section::Summary,
                Section::Education,
                Section::Experience,
                Section::Projects,
            ];
            Layout::TwoColumn {
                sidebar: Sidebar {
                    identity: identity(model),
                    sections: build_sections(model, visibility, &sidebar_sections),
                },
                main: build_sections(model, visibility, &main_sections),
            }
        }
        TemplateName::Classic | TemplateName::Minimal => {
            let order = [
                Section::Summary,
                Section::Skills,
                Section::Education,
                Section::Experience,
                Section::Projects,
            ];
            Layout::SingleColumn {
                header: Header {
                    identity: identity(model),
                    links: if visibility.links {
                        link_lines(model)
                    } else {
                        Vec::new()
                    },
                },
                sections: build_sections(model, visibility, &order),
            }
        }
    };

    RenderedResume {
        template,
        theme,
        accent_color: theme.accent_color().to_string(),
        style: StyleTokens::for_template(template, theme),
        layout,
    }
}

fn build_sections(
    model: &ResumeModel,
    visibility: &SectionVisibility,
    order: &[Section],
) -> Vec<RenderedSection> {
    order
        .iter()
        .filter(|s| visibility.is_visible(**s))
        .map(|&section| RenderedSection {
            section,
            title: section.heading().to_string(),
            content: section_content(model, section),
        })
        .collect()
}

fn section_content(model: &ResumeModel, section: Section) -> SectionContent {
    match section {
        Section::Summary => SectionContent::Summary {
            text: model.summary.trim().to_string(),
        },
        Section::Education => SectionContent::Education {
            entries: with_content(&model.education).map(education_item).collect(),
        },
        Section::Experience => SectionContent::Experience {
            entries: with_content(&model.experience)
                .map(experience_item)
                .collect(),
        },
        Section::Projects => SectionContent::Projects {
            entries: with_content(&model.projects).map(project_item).collect(),
        },
        Section::Skills => SectionContent::Skills {
            groups: SkillCategory::ALL
                .iter()
                .filter_map(|&category| {
                    let items: Vec<String> = model
                        .skills
                        .category(category)
                        .iter()
                        .map(|s| s.trim())
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                    (!items.is_empty()).then(|| SkillGroup {
                        label: category.label().to_string(),
                        items,
                    })
                })
                .collect(),
        },
        Section::Links => SectionContent::Links {
            links: link_lines(model),
        },
    }
}

fn with_content<'a, E: ResumeEntry + 'a>(entries: &'a [E]) -> impl Iterator<Item = &'a E> + 'a {
    entries.iter().filter(|e| e.has_content())
}

fn identity(model: &ResumeModel) -> Identity {
    let info = &model.personal_info;
    Identity {
        name: RenderedField::or_placeholder(&info.name, NAME_PLACEHOLDER),
        contact: [&info.email, &info.phone, &info.location]
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

fn link_lines(model: &ResumeModel) -> Vec<LinkLine> {
    [
        ("GitHub", &model.links.github),
        ("LinkedIn", &model.links.linkedin),
    ]
    .iter()
    .filter(|(_, url)| !url.trim().is_empty())
    .map(|(label, url)| LinkLine {
        label: label.to_string(),
        url: url.trim().to_string(),
    })
    .collect()
}

fn education_item(entry: &EducationEntry) -> EducationItem {
    EducationItem {
        institution: RenderedField::or_placeholder(&entry.institution, "Institution"),
        degree: RenderedField::or_placeholder(&entry.degree, "Degree"),
        year: RenderedField::or_placeholder(&entry.year, "Year"),
    }
}

fn experience_item(entry: &ExperienceEntry) -> ExperienceItem {
    ExperienceItem {
        position: RenderedField::or_placeholder(&entry.position, "Position"),
        company: RenderedField::or_placeholder(&entry.company, "Company"),
        duration: RenderedField::or_placeholder(&entry.duration, "Duration"),
        description: RenderedField::or_placeholder(&entry.description, "Description"),
    }
}

fn project_item(entry: &ProjectEntry) -> ProjectItem {
    ProjectItem {
        title: RenderedField::or_placeholder(&entry.title, "Project Title"),
        description: RenderedField::or_placeholder(&entry.description, "Project description"),
        tech_stack: entry.tech_stack.clone(),
        live_url: RenderedField::or_placeholder(&entry.live_url, "Live URL"),
        github_url: RenderedField::or_placeholder(&entry.github_url, "GitHub URL"),
    }
}
