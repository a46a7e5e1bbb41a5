use serde::{Deserialize, Serialize};

use crate::text::{collapse_whitespace, normalize_paragraph, strip_line_breaks, strip_spaces};

pub trait Preprocessor {
    fn process(&self, text: &str) -> String;
}

/// How captured text is cleaned before it is translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreprocessMode {
    /// Pass text through untouched
    None,
    /// Collapse whitespace runs, for text selected in PDFs and web pages
    #[default]
    Selection,
    /// Reflow hard-wrapped OCR or PDF paragraphs into one sentence per line
    Paragraph,
    RemoveLineBreaks,
    RemoveSpaces,
}

impl Preprocessor for PreprocessMode {
    fn process(&self, text: &str) -> String {
        match self {
            PreprocessMode::None => text.to_string(),
            PreprocessMode::Selection => collapse_whitespace(text),
            PreprocessMode::Paragraph => normalize_paragraph(text).trim().to_string(),
            PreprocessMode::RemoveLineBreaks => strip_line_breaks(text).trim().to_string(),
            PreprocessMode::RemoveSpaces => strip_spaces(text),
        }
    }
}
