use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::text::extract_latin;

/// English-letter ratio above which text is treated as English
pub const DEFAULT_DETECTION_THRESHOLD: f64 = 0.8;

/// Characters ignored when measuring the English-letter ratio
const IGNORED_PUNCTUATION: &str = concat!(
    "!\"#$%&'()*+,-./:;<=>?@[]^_`{|}~\\",
    "，。、《》？；‘’：“”【】·！￥…—（）",
);

/// Supported language tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LangTag {
    #[default]
    Auto,
    ZhCn,
    ZhTw,
    Yue,
    En,
    Ja,
    Ko,
    Fr,
    Es,
    Ru,
    De,
    It,
    Tr,
    PtPt,
    PtBr,
    Vi,
    Id,
    Th,
    Ms,
    Ar,
    Hi,
    MnCy,
    MnMo,
    Km,
    NbNo,
    NnNo,
    Fa,
    Sv,
    Pl,
    Nl,
    Uk,
}

impl LangTag {
    pub const ALL: [LangTag; 31] = [
        LangTag::Auto,
        LangTag::ZhCn,
        LangTag::ZhTw,
        LangTag::Yue,
        LangTag::En,
        LangTag::Ja,
        LangTag::Ko,
        LangTag::Fr,
        LangTag::Es,
        LangTag::Ru,
        LangTag::De,
        LangTag::It,
        LangTag::Tr,
        LangTag::PtPt,
        LangTag::PtBr,
        LangTag::Vi,
        LangTag::Id,
        LangTag::Th,
        LangTag::Ms,
        LangTag::Ar,
        LangTag::Hi,
        LangTag::MnCy,
        LangTag::MnMo,
        LangTag::Km,
        LangTag::NbNo,
        LangTag::NnNo,
        LangTag::Fa,
        LangTag::Sv,
        LangTag::Pl,
        LangTag::Nl,
        LangTag::Uk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LangTag::Auto => "auto",
            LangTag::ZhCn => "zh_cn",
            LangTag::ZhTw => "zh_tw",
            LangTag::Yue => "yue",
            LangTag::En => "en",
            LangTag::Ja => "ja",
            LangTag::Ko => "ko",
            LangTag::Fr => "fr",
            LangTag::Es => "es",
            LangTag::Ru => "ru",
            LangTag::De => "de",
            LangTag::It => "it",
            LangTag::Tr => "tr",
            LangTag::PtPt => "pt_pt",
            LangTag::PtBr => "pt_br",
            LangTag::Vi => "vi",
            LangTag::Id => "id",
            LangTag::Th => "th",
            LangTag::Ms => "ms",
            LangTag::Ar => "ar",
            LangTag::Hi => "hi",
            LangTag::MnCy => "mn_cy",
            LangTag::MnMo => "mn_mo",
            LangTag::Km => "km",
            LangTag::NbNo => "nb_no",
            LangTag::NnNo => "nn_no",
            LangTag::Fa => "fa",
            LangTag::Sv => "sv",
            LangTag::Pl => "pl",
            LangTag::Nl => "nl",
            LangTag::Uk => "uk",
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, LangTag::Auto)
    }
}

impl fmt::Display for LangTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown language tag: {0}")]
pub struct UnknownLangTag(pub String);

impl FromStr for LangTag {
    type Err = UnknownLangTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        LangTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == normalized)
            .ok_or_else(|| UnknownLangTag(s.to_string()))
    }
}

/// Source and target language of a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: LangTag,
    pub target: LangTag,
}

impl LanguagePair {
    pub fn new(source: LangTag, target: LangTag) -> Self {
        Self { source, target }
    }
}

/// Guess whether `text` is English or Chinese from its share of ASCII letters.
///
/// Digits, common ASCII/CJK punctuation, line breaks and spaces are ignored.
/// If more than `threshold` of what remains is ASCII letters the pair is
/// `en -> zh_cn`, otherwise `zh_cn -> en`. Text with nothing left after
/// stripping counts as ratio `0.0`.
///
/// Only tells English from Chinese. Other scripts land on the Chinese side.
pub fn detect_language_pair(text: &str, threshold: f64) -> LanguagePair {
    let stripped: String = text
        .chars()
        .filter(|c| !is_ignored_for_detection(*c))
        .collect();

    let total = stripped.chars().count();
    let latin = extract_latin(&stripped).chars().count();

    let ratio = if total == 0 {
        0.0
    } else {
        latin as f64 / total as f64
    };

    if ratio > threshold {
        LanguagePair::new(LangTag::En, LangTag::ZhCn)
    } else {
        LanguagePair::new(LangTag::ZhCn, LangTag::En)
    }
}

fn is_ignored_for_detection(c: char) -> bool {
    c.is_ascii_digit()
        || ('０'..='９').contains(&c)
        || matches!(c, '\r' | '\n' | ' ')
        || IGNORED_PUNCTUATION.contains(c)
}

/// Fill `auto` slots of a requested pair from the detected pair.
///
/// When both sides end up equal the target flips to the other side of the
/// detected pair, so `zh_cn -> zh_cn` never reaches a backend.
pub fn resolve_languages(
    text: &str,
    source: LangTag,
    target: LangTag,
    threshold: f64,
) -> LanguagePair {
    if !source.is_auto() && !target.is_auto() && source != target {
        return LanguagePair::new(source, target);
    }

    let detected = detect_language_pair(text, threshold);

    let source = if source.is_auto() {
        detected.source
    } else {
        source
    };
    let mut target = if target.is_auto() {
        detected.target
    } else {
        target
    };

    if source == target {
        target = if source == detected.source {
            detected.target
        } else {
            detected.source
        };
        tracing::debug!("Source equals target, switching target to {}", target);
    }

    LanguagePair::new(source, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(source: LangTag, target: LangTag) -> LanguagePair {
        LanguagePair::new(source, target)
    }

    #[test]
    fn test_detect_english() {
        assert_eq!(
            detect_language_pair("Hello World", DEFAULT_DETECTION_THRESHOLD),
            pair(LangTag::En, LangTag::ZhCn)
        );
    }

    #[test]
    fn test_detect_chinese() {
        assert_eq!(
            detect_language_pair("你好世界", DEFAULT_DETECTION_THRESHOLD),
            pair(LangTag::ZhCn, LangTag::En)
        );
    }

    #[test]
    fn test_detect_empty_is_chinese_side() {
        let zh_en = pair(LangTag::ZhCn, LangTag::En);
        assert_eq!(detect_language_pair("", 0.8), zh_en);
        assert_eq!(detect_language_pair("123, 456！\r\n", 0.8), zh_en);
        assert_eq!(detect_language_pair("", 0.0), zh_en);
    }

    #[test]
    fn test_detect_ignores_digits_and_punctuation() {
        assert_eq!(
            detect_language_pair("Version 2.0, released (2024)!", 0.8),
            pair(LangTag::En, LangTag::ZhCn)
        );
        assert_eq!(
            detect_language_pair("１２３ok", 0.8),
            pair(LangTag::En, LangTag::ZhCn)
        );
    }

    #[test]
    fn test_detect_mixed_respects_threshold() {
        // 8 latin letters, 2 CJK characters: ratio 0.8
        let text = "hello abc 你好";
        assert_eq!(detect_language_pair(text, 0.8), pair(LangTag::ZhCn, LangTag::En));
        assert_eq!(detect_language_pair(text, 0.5), pair(LangTag::En, LangTag::ZhCn));
    }

    #[test]
    fn test_resolve_keeps_explicit_pair() {
        assert_eq!(
            resolve_languages("你好", LangTag::Ja, LangTag::Ko, 0.8),
            pair(LangTag::Ja, LangTag::Ko)
        );
    }

    #[test]
    fn test_resolve_fills_auto() {
        assert_eq!(
            resolve_languages("hello", LangTag::Auto, LangTag::Auto, 0.8),
            pair(LangTag::En, LangTag::ZhCn)
        );
        assert_eq!(
            resolve_languages("hello", LangTag::Auto, LangTag::Ja, 0.8),
            pair(LangTag::En, LangTag::Ja)
        );
        assert_eq!(
            resolve_languages("你好", LangTag::Fr, LangTag::Auto, 0.8),
            pair(LangTag::Fr, LangTag::En)
        );
    }

    #[test]
    fn test_resolve_avoids_same_language() {
        assert_eq!(
            resolve_languages("你好", LangTag::Auto, LangTag::ZhCn, 0.8),
            pair(LangTag::ZhCn, LangTag::En)
        );
        assert_eq!(
            resolve_languages("hello", LangTag::En, LangTag::En, 0.8),
            pair(LangTag::En, LangTag::ZhCn)
        );
    }

    #[test]
    fn test_lang_tag_parse_and_display() {
        assert_eq!("zh_cn".parse::<LangTag>(), Ok(LangTag::ZhCn));
        assert_eq!("PT-BR".parse::<LangTag>(), Ok(LangTag::PtBr));
        assert!("klingon".parse::<LangTag>().is_err());
        for tag in LangTag::ALL {
            assert_eq!(tag.to_string().parse::<LangTag>(), Ok(tag));
        }
    }

    #[test]
    fn test_lang_tag_serde_uses_snake_case() {
        assert_eq!(serde_json::to_string(&LangTag::NbNo).unwrap(), "\"nb_no\"");
        let tag: LangTag = serde_json::from_str("\"zh_tw\"").unwrap();
        assert_eq!(tag, LangTag::ZhTw);
    }
}
