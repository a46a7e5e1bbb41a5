use fanyi_core::LangTag;
use uuid::Uuid;

pub mod deepl;
pub mod pipeline;

pub use deepl::DeepLTranslator;
pub use pipeline::{
    DEFAULT_CACHE_CAPACITY, PipelineSettings, TranslationPipeline, TranslationRequest,
};

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language.
    ///
    /// `from` may be `LangTag::Auto` when the provider can detect on its own;
    /// `to` is always concrete.
    async fn translate(
        &self,
        text: &str,
        from: LangTag,
        to: LangTag,
    ) -> Result<Translation, TranslateError>;

    /// Whether the provider accepts this language on either side
    fn supports(&self, lang: LangTag) -> bool;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub text: String,
    pub from: LangTag,
    pub to: LangTag,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub id: Uuid,
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(LangTag),

    #[error("Nothing to translate")]
    EmptyInput,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}
