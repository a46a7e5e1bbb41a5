pub mod case;
pub mod error;
pub mod language;
pub mod predicate;
pub mod preprocess;
pub mod text;
pub mod types;
pub mod version;

pub use case::{OutputCase, to_camel_case, to_snake_case};
pub use error::FormatError;
pub use language::{
    DEFAULT_DETECTION_THRESHOLD, LangTag, LanguagePair, detect_language_pair, resolve_languages,
};
pub use predicate::{is_chinese, is_word};
pub use preprocess::{PreprocessMode, Preprocessor};
pub use text::{
    collapse_whitespace, digest, extract_latin, normalize_paragraph, strip_line_breaks,
    strip_spaces,
};
pub use version::can_upgrade;
