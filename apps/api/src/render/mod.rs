// Template rendering: the preview tree and the plain-text export.

pub mod plain_text;
pub mod preview;
pub mod template;

pub use plain_text::{export_plain_text, PlainTextExport};
pub use preview::{render, RenderedResume};
pub use template::{ColorTheme, TemplateName};
