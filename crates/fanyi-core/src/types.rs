use crate::language::LangTag;

#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigChanged,
    TextInput {
        text: String,
        source: TextSource,
        /// Skip the translation cache
        force: bool,
    },
    /// Clean up text and show it without translating
    PlaceInput(String),

    // Outgoing, consumed by the display side
    ShowInput(String),
    ShowTranslation {
        text: String,
        from: LangTag,
        to: LangTag,
        provider: String,
    },
    TranslationFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Clipboard,
    ExternalCall,
    Manual,
}
