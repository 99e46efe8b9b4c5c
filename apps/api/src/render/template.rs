//! Closed template and colour-theme selections. Unknown names never fail:
//! they fall back to `classic` / `teal`.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateName {
    #[default]
    Classic,
    Modern,
    Minimal,
}

impl TemplateName {
    pub const ALL: [TemplateName; 3] = [
        TemplateName::Classic,
        TemplateName::Modern,
        TemplateName::Minimal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateName::Classic => "classic",
            TemplateName::Modern => "modern",
            TemplateName::Minimal => "minimal",
        }
    }

    /// Case-insensitive lookup; anything unrecognised is `Classic`.
    pub fn parse_lenient(input: &str) -> Self {
        lookup(&Self::ALL, Self::as_str, input).unwrap_or_default()
    }

    /// Reads a persisted value, which is normally a JSON string (`"modern"`)
    /// but may be a bare name written by hand.
    pub fn from_persisted(raw: &str) -> Self {
        Self::parse_lenient(&unquote(raw))
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Teal,
    Navy,
    Burgundy,
    Forest,
    Charcoal,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 5] = [
        ColorTheme::Teal,
        ColorTheme::Navy,
        ColorTheme::Burgundy,
        ColorTheme::Forest,
        ColorTheme::Charcoal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorTheme::Teal => "teal",
            ColorTheme::Navy => "navy",
            ColorTheme::Burgundy => "burgundy",
            ColorTheme::Forest => "forest",
            ColorTheme::Charcoal => "charcoal",
        }
    }

    /// Accent colour as a CSS hex value.
    pub fn accent_color(self) -> &'static str {
        match self {
            ColorTheme::Teal => "#0d9488",
            ColorTheme::Navy => "#1e3a8a",
            ColorTheme::Burgundy => "#800020",
            ColorTheme::Forest => "#228b22",
            ColorTheme::Charcoal => "#36454f",
        }
    }

    /// Case-insensitive lookup; anything unrecognised is `Teal`.
    pub fn parse_lenient(input: &str) -> Self {
        lookup(&Self::ALL, Self::as_str, input).unwrap_or_default()
    }

    pub fn from_persisted(raw: &str) -> Self {
        Self::parse_lenient(&unquote(raw))
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn lookup<T: Copy>(all: &[T], name: fn(T) -> &'static str, input: &str) -> Option<T> {
    let input = input.trim();
    all.iter().copied().find(|c| name(*c).eq_ignore_ascii_case(input))
}

fn unquote(raw: &str) -> String {
    serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw.to_string())
}
