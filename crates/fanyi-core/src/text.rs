//! String cleanup for copied, selected and OCR-extracted text.
//!
//! Everything here is a pure function over `&str`. Patterns are compiled once
//! and shared across threads.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Latin sentence end followed by an optional space and a line break
static LATIN_SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?!.]) ?\n").expect("latin sentence pattern is valid"));

/// CJK sentence end followed by an optional space and a line break
static CJK_SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([？！。]) ?\n").expect("cjk sentence pattern is valid"));

static MARKED_SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([?？！!.。])#").expect("sentinel pattern is valid"));

/// Lowercase hex MD5 of the UTF-8 bytes of `text`
pub fn digest(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}

/// Concatenate every run of ASCII letters, in order of occurrence
pub fn extract_latin(text: &str) -> String {
    text.chars().filter(char::is_ascii_alphabetic).collect()
}

/// Collapse each whitespace run into one space and trim the ends.
///
/// Text copied out of PDFs tends to carry stray tabs, hard wraps and doubled
/// spaces; this flattens all of them.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Replace CRLF, LF and CR with a single space each
pub fn strip_line_breaks(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Remove literal spaces. Tabs and line breaks are kept.
pub fn strip_spaces(text: &str) -> String {
    text.replace(' ', "")
}

/// Reflow a hard-wrapped paragraph into one sentence per line.
///
/// Stages, in order:
/// 1. drop the first NUL and everything after it (garbled copy buffers)
/// 2. fold CRLF and lone CR into LF
/// 3. rejoin words hyphen-wrapped across a line break
/// 4. mark sentence ends that sit right before a line break, Latin first
///    then CJK, as `#<punct>#`
/// 5. flatten every other line break into a space
/// 6. turn each marked sentence end back into `<punct>\n`
///
/// ```
/// use fanyi_core::normalize_paragraph;
///
/// let out = normalize_paragraph("First part-\nof it.\nSecond\nline。\n");
/// assert_eq!(out, "First partof it.\nSecond line。\n");
/// ```
pub fn normalize_paragraph(text: &str) -> String {
    // Everything after the NUL goes, later lines included. The older
    // line-oriented cleanup stopped at the next line break.
    let text = match text.find('\0') {
        Some(idx) => &text[..idx],
        None => text,
    };

    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = text.replace("-\n", "");

    let text = LATIN_SENTENCE_BREAK.replace_all(&text, "#${1}#");
    let text = CJK_SENTENCE_BREAK.replace_all(&text, "#${1}#");

    let text = text.replace('\n', " ");

    MARKED_SENTENCE_END
        .replace_all(&text, "${1}\n")
        .into_owned()
}
