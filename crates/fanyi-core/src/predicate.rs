const MAX_WORD_LEN: usize = 100;
const MAX_WORD_TOKENS: usize = 3;

/// Short ASCII phrase of at most three space-separated parts.
///
/// Used to route single words and tiny phrases to dictionary-style lookups
/// instead of full sentence translation.
pub fn is_word(text: &str) -> bool {
    if text.is_empty() || text.len() > MAX_WORD_LEN {
        return false;
    }

    text.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ')
        && text.split(' ').count() <= MAX_WORD_TOKENS
}

/// Non-empty and made only of CJK Unified Ideographs (U+4E00..=U+9FA5)
pub fn is_chinese(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| ('\u{4E00}'..='\u{9FA5}').contains(&c))
}
