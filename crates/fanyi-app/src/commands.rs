use std::io::Read;

use anyhow::{Context, bail};
use clap::Subcommand;
use fanyi_core::{
    DEFAULT_DETECTION_THRESHOLD, can_upgrade, collapse_whitespace, detect_language_pair, digest,
    extract_latin, is_chinese, is_word, normalize_paragraph, strip_line_breaks, strip_spaces,
    to_camel_case, to_snake_case,
};

/// One-shot text operations. TEXT falls back to stdin when piped.
#[derive(Subcommand, Debug, Clone)]
pub enum TextOp {
    /// MD5 of the text as lowercase hex
    Digest { text: Option<String> },
    /// hello_world
    Snake { text: Option<String> },
    /// HelloWorld, or helloWorld with --small
    Camel {
        #[arg(long)]
        small: bool,
        text: Option<String>,
    },
    /// Keep only ASCII letters
    Latin { text: Option<String> },
    /// Guess the English/Chinese language pair
    Detect {
        #[arg(long, default_value_t = DEFAULT_DETECTION_THRESHOLD)]
        threshold: f64,
        text: Option<String>,
    },
    /// Collapse whitespace runs into single spaces
    Collapse { text: Option<String> },
    StripBreaks { text: Option<String> },
    StripSpaces { text: Option<String> },
    /// Reflow a hard-wrapped paragraph into one sentence per line
    Normalize { text: Option<String> },
    IsWord { text: Option<String> },
    IsChinese { text: Option<String> },
}

impl TextOp {
    fn text(&self) -> Option<&str> {
        match self {
            TextOp::Digest { text }
            | TextOp::Snake { text }
            | TextOp::Camel { text, .. }
            | TextOp::Latin { text }
            | TextOp::Detect { text, .. }
            | TextOp::Collapse { text }
            | TextOp::StripBreaks { text }
            | TextOp::StripSpaces { text }
            | TextOp::Normalize { text }
            | TextOp::IsWord { text }
            | TextOp::IsChinese { text } => text.as_deref(),
        }
    }

    pub fn apply(&self, input: &str) -> String {
        match self {
            TextOp::Digest { .. } => digest(input),
            TextOp::Snake { .. } => to_snake_case(input),
            TextOp::Camel { small, .. } => to_camel_case(input, *small),
            TextOp::Latin { .. } => extract_latin(input),
            TextOp::Detect { threshold, .. } => {
                let pair = detect_language_pair(input, *threshold);
                format!("{} -> {}", pair.source, pair.target)
            }
            TextOp::Collapse { .. } => collapse_whitespace(input),
            TextOp::StripBreaks { .. } => strip_line_breaks(input),
            TextOp::StripSpaces { .. } => strip_spaces(input),
            TextOp::Normalize { .. } => normalize_paragraph(input),
            TextOp::IsWord { .. } => is_word(input).to_string(),
            TextOp::IsChinese { .. } => is_chinese(input).to_string(),
        }
    }
}

pub fn run_text(op: &TextOp) -> anyhow::Result<String> {
    let input = match op.text() {
        Some(text) => text.to_string(),
        None => read_stdin()?,
    };

    tracing::debug!("Running {:?} on {} chars", op, input.chars().count());
    Ok(op.apply(&input))
}

pub fn run_upgrade(remote: &str, local: &str) -> anyhow::Result<String> {
    let upgradable = can_upgrade(remote, local)
        .with_context(|| format!("cannot compare versions {remote} and {local}"))?;

    if upgradable {
        Ok(format!("Upgrade available: {local} -> {remote}"))
    } else {
        Ok(format!("Up to date ({local})"))
    }
}

fn read_stdin() -> anyhow::Result<String> {
    if atty::is(atty::Stream::Stdin) {
        bail!("no TEXT given and stdin is a terminal");
    }

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(trim_final_newline(input))
}

/// Drop the one line break shells append to piped input
fn trim_final_newline(mut input: String) -> String {
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    input
}
