use serde::{Deserialize, Serialize};

/// Identifier style applied to a finished translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputCase {
    #[default]
    None,
    /// `hello_world`
    Snake,
    /// `helloWorld`
    SmallCamel,
    /// `HelloWorld`
    LargeCamel,
}

impl OutputCase {
    pub fn apply(self, text: &str) -> String {
        match self {
            OutputCase::None => text.to_string(),
            OutputCase::Snake => to_snake_case(text),
            OutputCase::SmallCamel => to_camel_case(text, true),
            OutputCase::LargeCamel => to_camel_case(text, false),
        }
    }
}

/// Lowercase every space-separated word and join them with `_`.
///
/// Empty words from repeated or leading spaces are dropped so the result never
/// carries a stray underscore.
pub fn to_snake_case(text: &str) -> String {
    text.split(' ')
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Join the words of each line into one camel-cased identifier per line.
///
/// With `small_first` the first word of a line starts lowercase.
pub fn to_camel_case(text: &str, small_first: bool) -> String {
    text.split('\n')
        .map(|line| camel_line(line, small_first))
        .collect::<Vec<_>>()
        .join("\n")
}

fn camel_line(line: &str, small_first: bool) -> String {
    let mut out = String::with_capacity(line.len());

    // Counts only non-empty words, so a leading space does not turn
    // `small_first` off. Older releases keyed on the raw split position and
    // produced `HelloWorld` for " hello world".
    for (idx, word) in line.split(' ').filter(|w| !w.is_empty()).enumerate() {
        let mut chars = word.chars();
        let Some(first) = chars.next() else {
            continue;
        };

        if idx == 0 && small_first {
            out.extend(first.to_lowercase());
        } else {
            out.extend(first.to_uppercase());
        }
        out.push_str(&chars.as_str().to_lowercase());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("Hello World"), "hello_world");
        assert_eq!(to_snake_case("single"), "single");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_snake_case_drops_empty_words() {
        assert_eq!(to_snake_case(" Leading space"), "leading_space");
        assert_eq!(to_snake_case("a  b "), "a_b");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("hello world", false), "HelloWorld");
        assert_eq!(to_camel_case("hello world", true), "helloWorld");
        assert_eq!(to_camel_case("HELLO wORLD", true), "helloWorld");
    }

    #[test]
    fn test_camel_case_per_line() {
        assert_eq!(
            to_camel_case("get user name\nset  user id", true),
            "getUserName\nsetUserId"
        );
        assert_eq!(to_camel_case("a b\r\nc d", false), "AB\r\nCD");
    }

    #[test]
    fn test_camel_case_leading_space_keeps_small_first() {
        assert_eq!(to_camel_case(" hello world", true), "helloWorld");
    }

    #[test]
    fn test_camel_case_empty() {
        assert_eq!(to_camel_case("", false), "");
        assert_eq!(to_camel_case("\n", true), "\n");
    }

    #[test]
    fn test_output_case_apply() {
        assert_eq!(OutputCase::None.apply("Keep Me"), "Keep Me");
        assert_eq!(OutputCase::Snake.apply("Keep Me"), "keep_me");
        assert_eq!(OutputCase::SmallCamel.apply("Keep Me"), "keepMe");
        assert_eq!(OutputCase::LargeCamel.apply("keep me"), "KeepMe");
    }
}
