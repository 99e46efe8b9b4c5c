//! Bullet quality helpers for experience and project descriptions.
//!
//! These are advisory and never feed the ATS score directly; the score has its
//! own summary verb check and quantified-impact check in `ats`.

use serde::{Deserialize, Serialize};

use crate::models::ResumeModel;

/// Verbs a strong bullet opens with. Matched case-sensitively as a prefix.
pub const BULLET_ACTION_VERBS: &[&str] = &[
    "Built",
    "Developed",
    "Designed",
    "Implemented",
    "Led",
    "Improved",
    "Created",
    "Optimized",
    "Automated",
];

const MAGNITUDE_SUFFIXES: &[char] = &['k', 'm', 'b'];

/// True iff the trimmed text begins with one of [`BULLET_ACTION_VERBS`].
pub fn starts_with_action_verb(text: &str) -> bool {
    let text = text.trim();
    BULLET_ACTION_VERBS.iter().any(|v| text.starts_with(v))
}

/// True iff the text contains a digit, a `%`, or a magnitude letter
/// (`k`, `m`, `b`, any case) anywhere.
pub fn has_numeric_indicator(text: &str) -> bool {
    text.chars().any(|c| {
        c.is_ascii_digit() || c == '%' || MAGNITUDE_SUFFIXES.contains(&c.to_ascii_lowercase())
    })
}

/// Extracts quantity tokens from free text ("40%", "10k", "$2M", "3").
pub fn find_metrics(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut metrics = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let mut start = i;
        if start > 0 && matches!(chars[start - 1], '$' | '€' | '£' | '~') {
            start -= 1;
        }

        let mut end = i;
        while end < chars.len()
            && (chars[end].is_ascii_digit()
                || (matches!(chars[end], '.' | ',')
                    && chars.get(end + 1).is_some_and(|c| c.is_ascii_digit())))
        {
            end += 1;
        }

        if let Some(&next) = chars.get(end) {
            let lower = next.to_ascii_lowercase();
            let suffix_ends_word = chars
                .get(end + 1)
                .map_or(true, |c| !c.is_alphanumeric());
            let is_magnitude = MAGNITUDE_SUFFIXES.contains(&lower) && suffix_ends_word;
            if next == '%' || next == '+' || is_magnitude {
                end += 1;
            }
        }

        metrics.push(chars[start..end].iter().collect());
        i = end;
    }

    metrics
}

/// Where a described bullet lives in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletSource {
    Experience,
    Project,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletReview {
    pub source: BulletSource,
    pub index: usize,
    pub text: String,
    pub starts_with_action_verb: bool,
    pub has_numeric_indicator: bool,
    pub metrics: Vec<String>,
    pub hints: Vec<String>,
}

/// Reviews every non-blank experience and project description, in model order.
pub fn review_bullets(model: &ResumeModel) -> Vec<BulletReview> {
    let experience = model
        .experience
        .iter()
        .enumerate()
        .map(|(i, e)| (BulletSource::Experience, i, e.description.as_str()));
    let projects = model
        .projects
        .iter()
        .enumerate()
        .map(|(i, p)| (BulletSource::Project, i, p.description.as_str()));

    experience
        .chain(projects)
        .filter(|(_, _, text)| !text.trim().is_empty())
        .map(|(source, index, text)| review_bullet(source, index, text))
        .collect()
}

fn review_bullet(source: BulletSource, index: usize, text: &str) -> BulletReview {
    let starts_with_action_verb = starts_with_action_verb(text);
    let has_numeric_indicator = has_numeric_indicator(text);

    let mut hints = Vec::new();
    if !starts_with_action_verb {
        hints.push("Start with a strong action verb.".to_string());
    }
    if !has_numeric_indicator {
        hints.push("Add measurable impact (numbers).".to_string());
    }

    BulletReview {
        source,
        index,
        text: text.trim().to_string(),
        starts_with_action_verb,
        has_numeric_indicator,
        metrics: find_metrics(text),
        hints,
    }
}
