//! ATS readiness scoring: an additive rubric of independent checks, capped at 100.
//!
//! Weights and thresholds live in [`AtsRubric`] so they can be tuned from
//! configuration (`ATS_RUBRIC_PATH`) without touching the checks themselves.

use serde::{Deserialize, Serialize};

use crate::engine::bullets::has_numeric_indicator;
use crate::models::ResumeModel;

pub const MAX_SCORE: u32 = 100;

/// Verbs that mark an achievement-oriented summary. Matched as whole words,
/// case-insensitively.
pub const SUMMARY_ACTION_VERBS: &[&str] = &[
    "built",
    "led",
    "designed",
    "improved",
    "created",
    "managed",
    "developed",
    "implemented",
    "launched",
    "established",
];

// ────────────────────────────────────────────────────────────────────────────
// Rubric
// ────────────────────────────────────────────────────────────────────────────

/// Identifier of a single rubric check, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtsCheck {
    Name,
    Email,
    Phone,
    SummaryLength,
    CompleteExperience,
    Education,
    SkillCount,
    Project,
    GithubLink,
    LinkedinLink,
    SummaryActionVerb,
    QuantifiedImpact,
}

impl AtsCheck {
    pub const ALL: [AtsCheck; 12] = [
        AtsCheck::Name,
        AtsCheck::Email,
        AtsCheck::Phone,
        AtsCheck::SummaryLength,
        AtsCheck::CompleteExperience,
        AtsCheck::Education,
        AtsCheck::SkillCount,
        AtsCheck::Project,
        AtsCheck::GithubLink,
        AtsCheck::LinkedinLink,
        AtsCheck::SummaryActionVerb,
        AtsCheck::QuantifiedImpact,
    ];
}

/// Point values per check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtsWeights {
    pub name: u32,
    pub email: u32,
    pub phone: u32,
    pub summary_length: u32,
    pub complete_experience: u32,
    pub education: u32,
    pub skill_count: u32,
    pub project: u32,
    pub github_link: u32,
    pub linkedin_link: u32,
    pub summary_action_verb: u32,
    pub quantified_impact: u32,
}

impl Default for AtsWeights {
    fn default() -> Self {
        Self {
            name: 10,
            email: 10,
            phone: 5,
            summary_length: 10,
            complete_experience: 15,
            education: 10,
            skill_count: 10,
            project: 10,
            github_link: 5,
            linkedin_link: 5,
            summary_action_verb: 10,
            quantified_impact: 15,
        }
    }
}

/// The canonical rubric: summary judged on trimmed character length, skills
/// on a single count threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtsRubric {
    pub weights: AtsWeights,
    /// Summary must be strictly longer than this many trimmed characters.
    pub summary_min_chars: usize,
    /// Minimum number of non-blank skills across all categories.
    pub min_skill_count: usize,
}

impl Default for AtsRubric {
    fn default() -> Self {
        Self {
            weights: AtsWeights::default(),
            summary_min_chars: 50,
            min_skill_count: 5,
        }
    }
}

impl AtsRubric {
    pub fn points(&self, check: AtsCheck) -> u32 {
        let w = &self.weights;
        match check {
            AtsCheck::Name => w.name,
            AtsCheck::Email => w.email,
            AtsCheck::Phone => w.phone,
            AtsCheck::SummaryLength => w.summary_length,
            AtsCheck::CompleteExperience => w.complete_experience,
            AtsCheck::Education => w.education,
            AtsCheck::SkillCount => w.skill_count,
            AtsCheck::Project => w.project,
            AtsCheck::GithubLink => w.github_link,
            AtsCheck::LinkedinLink => w.linkedin_link,
            AtsCheck::SummaryActionVerb => w.summary_action_verb,
            AtsCheck::QuantifiedImpact => w.quantified_impact,
        }
    }

    /// Evaluates one check against the model.
    pub fn passes(&self, check: AtsCheck, model: &ResumeModel) -> bool {
        let info = &model.personal_info;
        match check {
            AtsCheck::Name => is_present(&info.name),
            AtsCheck::Email => is_present(&info.email),
            AtsCheck::Phone => is_present(&info.phone),
            AtsCheck::SummaryLength => {
                model.summary.trim().chars().count() > self.summary_min_chars
            }
            AtsCheck::CompleteExperience => model.experience.iter().any(|e| e.is_complete()),
            AtsCheck::Education => model.education.iter().any(|e| {
                is_present(&e.institution) || is_present(&e.degree) || is_present(&e.year)
            }),
            AtsCheck::SkillCount => model.skills.total() >= self.min_skill_count,
            AtsCheck::Project => model
                .projects
                .iter()
                .any(|p| is_present(&p.title) || is_present(&p.description)),
            AtsCheck::GithubLink => is_present(&model.links.github),
            AtsCheck::LinkedinLink => is_present(&model.links.linkedin),
            AtsCheck::SummaryActionVerb => contains_summary_action_verb(&model.summary),
            AtsCheck::QuantifiedImpact => {
                let experience = model.experience.iter().map(|e| e.description.as_str());
                let projects = model.projects.iter().map(|p| p.description.as_str());
                experience.chain(projects).any(has_numeric_indicator)
            }
        }
    }

    /// Remediation text for a failing check, naming its point value.
    pub fn remediation(&self, check: AtsCheck) -> String {
        let points = self.points(check);
        let advice = match check {
            AtsCheck::Name => "Add your full name".to_string(),
            AtsCheck::Email => "Add a professional email address".to_string(),
            AtsCheck::Phone => "Add a phone number".to_string(),
            AtsCheck::SummaryLength => format!(
                "Write a professional summary longer than {} characters",
                self.summary_min_chars
            ),
            AtsCheck::CompleteExperience => {
                "Add an experience entry with company, position, and description".to_string()
            }
            AtsCheck::Education => "Add at least one education entry".to_string(),
            AtsCheck::SkillCount => format!("List at least {} skills", self.min_skill_count),
            AtsCheck::Project => "Add a project with a title and description".to_string(),
            AtsCheck::GithubLink => "Add your GitHub profile link".to_string(),
            AtsCheck::LinkedinLink => "Add your LinkedIn profile link".to_string(),
            AtsCheck::SummaryActionVerb => {
                "Use an action verb like \"built\" or \"led\" in your summary".to_string()
            }
            AtsCheck::QuantifiedImpact => {
                "Quantify impact with numbers in experience or project descriptions".to_string()
            }
        };
        format!("{advice} (+{points} points)")
    }
}

fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True iff any whole word of the summary is one of [`SUMMARY_ACTION_VERBS`].
pub fn contains_summary_action_verb(summary: &str) -> bool {
    summary
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .any(|w| {
            SUMMARY_ACTION_VERBS
                .iter()
                .any(|v| v.eq_ignore_ascii_case(w))
        })
}

// ────────────────────────────────────────────────────────────────────────────
// Report
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check: AtsCheck,
    pub passed: bool,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub check: AtsCheck,
    pub points: u32,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => ScoreBand::Strong,
            s if s >= 50 => ScoreBand::Moderate,
            _ => ScoreBand::Weak,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsReport {
    pub score: u32,
    pub band: ScoreBand,
    pub checks: Vec<CheckResult>,
    pub suggestions: Vec<Suggestion>,
}

/// Runs every check, sums satisfied points (clamped to [`MAX_SCORE`]), and
/// returns at most `suggestion_limit` suggestions.
///
/// Suggestions are ordered by point value, highest first; checks worth the
/// same number of points keep their declaration order. Checks weighted at zero
/// never produce a suggestion.
pub fn score(model: &ResumeModel, rubric: &AtsRubric, suggestion_limit: usize) -> AtsReport {
    let checks: Vec<CheckResult> = AtsCheck::ALL
        .iter()
        .map(|&check| CheckResult {
            check,
            passed: rubric.passes(check, model),
            points: rubric.points(check),
        })
        .collect();

    let total: u32 = checks.iter().filter(|c| c.passed).map(|c| c.points).sum();
    let score = total.min(MAX_SCORE);

    let mut failing: Vec<&CheckResult> = checks
        .iter()
        .filter(|c| !c.passed && c.points > 0)
        .collect();
    // Stable sort keeps declaration order among equal weights.
    failing.sort_by(|a, b| b.points.cmp(&a.points));

    let suggestions = failing
        .into_iter()
        .take(suggestion_limit)
        .map(|c| Suggestion {
            check: c.check,
            points: c.points,
            message: rubric.remediation(c.check),
        })
        .collect();

    AtsReport {
        score,
        band: ScoreBand::from_score(score),
        checks,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationEntry, ExperienceEntry, ProjectEntry};

    fn words(n: usize) -> String {
        let mut text = String::from("Built systems serving 3 regions");
        for i in 0..n.saturating_sub(5) {
            text.push_str(if i % 2 == 0 { " reliable" } else { " software" });
        }
        text
    }

    #[test]
    fn test_empty_model_scores_zero() {
        let report = score(&ResumeModel::default(), &AtsRubric::default(), 5);
        assert_eq!(report.score, 0);
        assert_eq!(report.band, ScoreBand::Weak);
        assert!(report.checks.iter().all(|c| !c.passed));
        assert_eq!(report.suggestions.len(), 5);
    }

    #[test]
    fn test_suggestions_ordered_by_points_then_declaration() {
        let report = score(&ResumeModel::default(), &AtsRubric::default(), 5);
        let order: Vec<AtsCheck> = report.suggestions.iter().map(|s| s.check).collect();
        assert_eq!(
            order,
            vec![
                AtsCheck::CompleteExperience,
                AtsCheck::QuantifiedImpact,
                AtsCheck::Name,
                AtsCheck::Email,
                AtsCheck::SummaryLength,
            ]
        );
        assert!(report.suggestions[0].message.contains("+15 points"));
    }

    #[test]
    fn test_suggestion_limit_is_respected() {
        let report = score(&ResumeModel::default(), &AtsRubric::default(), 3);
        assert_eq!(report.suggestions.len(), 3);
    }

    #[test]
    fn test_reference_profile_scores_ninety() {
        let mut model = ResumeModel {
            summary: words(80),
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                position: "Engineer".to_string(),
                duration: "2020 - 2023".to_string(),
                description: "Cut p99 latency by 35%".to_string(),
            }],
            education: vec![EducationEntry {
                institution: "State University".to_string(),
                degree: "BSc".to_string(),
                year: "2019".to_string(),
            }],
            ..ResumeModel::default()
        };
        model.personal_info.name = "Jane Doe".to_string();
        model.personal_info.email = "jane@x.com".to_string();
        model.skills.technical = vec!["Rust".into(), "Go".into(), "SQL".into()];
        model.skills.soft = vec!["Mentoring".into(), "Writing".into()];
        model.skills.tools = vec!["Git".into()];

        let report = score(&model, &AtsRubric::default(), 5);
        // name 10 + email 10 + experience 15 + education 10 + skills 10
        // + summary length 10 + action verb 10 + quantified 15
        assert_eq!(report.score, 90, "checks: {:?}", report.checks);
        assert_eq!(report.band, ScoreBand::Strong);
        let failing: Vec<AtsCheck> = report.suggestions.iter().map(|s| s.check).collect();
        assert_eq!(
            failing,
            vec![
                AtsCheck::Project,
                AtsCheck::Phone,
                AtsCheck::GithubLink,
                AtsCheck::LinkedinLink,
            ]
        );
    }

    #[test]
    fn test_score_is_capped_at_one_hundred() {
        let report = score(&ResumeModel::sample(), &AtsRubric::default(), 5);
        assert_eq!(report.score, MAX_SCORE);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_score_is_monotonic_as_checks_pass() {
        let rubric = AtsRubric::default();
        let mut model = ResumeModel::default();
        let mut last = score(&model, &rubric, 5).score;

        model.personal_info.name = "Jane".to_string();
        let next = score(&model, &rubric, 5).score;
        assert!(next >= last);
        last = next;

        model.projects = vec![ProjectEntry {
            title: "Compiler".to_string(),
            ..ProjectEntry::default()
        }];
        let next = score(&model, &rubric, 5).score;
        assert!(next >= last);
        last = next;

        model.links.github = "https://github.com/jane".to_string();
        let next = score(&model, &rubric, 5).score;
        assert!(next >= last && next <= MAX_SCORE);
        assert_eq!(next, 25);
    }

    #[test]
    fn test_summary_length_boundary() {
        let rubric = AtsRubric::default();
        let mut model = ResumeModel {
            summary: format!("  {}  ", "a".repeat(50)),
            ..ResumeModel::default()
        };
        assert!(!rubric.passes(AtsCheck::SummaryLength, &model));
        model.summary = "a".repeat(51);
        assert!(rubric.passes(AtsCheck::SummaryLength, &model));
    }

    #[test]
    fn test_incomplete_experience_does_not_count() {
        let model = ResumeModel {
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                position: "Engineer".to_string(),
                ..ExperienceEntry::default()
            }],
            ..ResumeModel::default()
        };
        assert!(!AtsRubric::default().passes(AtsCheck::CompleteExperience, &model));
    }

    #[test]
    fn test_summary_action_verb_whole_word_case_insensitive() {
        assert!(contains_summary_action_verb("I LED the platform team."));
        assert!(contains_summary_action_verb("Engineer who built things"));
        assert!(!contains_summary_action_verb("Rebuilt nothing, ledger expert"));
    }

    #[test]
    fn test_quantified_impact_considers_project_descriptions() {
        let model = ResumeModel {
            projects: vec![ProjectEntry {
                title: "Bot".to_string(),
                description: "Serves 2k users".to_string(),
                ..ProjectEntry::default()
            }],
            ..ResumeModel::default()
        };
        assert!(AtsRubric::default().passes(AtsCheck::QuantifiedImpact, &model));
    }

    #[test]
    fn test_quantified_impact_accepts_magnitude_letter() {
        let model = ResumeModel {
            experience: vec![ExperienceEntry {
                description: "Led the backend team".to_string(),
                ..ExperienceEntry::default()
            }],
            ..ResumeModel::default()
        };
        assert!(AtsRubric::default().passes(AtsCheck::QuantifiedImpact, &model));

        let plain = ResumeModel {
            experience: vec![ExperienceEntry {
                description: "Wrote docs for the site".to_string(),
                ..ExperienceEntry::default()
            }],
            ..ResumeModel::default()
        };
        assert!(!AtsRubric::default().passes(AtsCheck::QuantifiedImpact, &plain));
    }

    #[test]
    fn test_custom_weights_change_score_and_skip_zero_weight_suggestions() {
        let rubric: AtsRubric =
            serde_json::from_str(r#"{"weights": {"name": 40, "phone": 0}, "min_skill_count": 8}"#)
                .unwrap();
        assert_eq!(rubric.weights.email, 10);
        assert_eq!(rubric.min_skill_count, 8);
        assert_eq!(rubric.summary_min_chars, 50);

        let mut model = ResumeModel::default();
        model.personal_info.name = "Jane".to_string();
        let report = score(&model, &rubric, 12);
        assert_eq!(report.score, 40);
        assert!(report.suggestions.iter().all(|s| s.check != AtsCheck::Phone));
        assert!(report
            .suggestions
            .iter()
            .any(|s| s.message == "List at least 8 skills (+10 points)"));
    }
}
