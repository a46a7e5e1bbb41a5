use std::collections::HashMap;

use fanyi_core::{
    LangTag, LanguagePair, OutputCase, PreprocessMode, Preprocessor, digest, resolve_languages,
};
use tokio::sync::RwLock;

use crate::{TranslateError, Translation, Translator};

/// Cached translations kept when no capacity is configured
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub source: LangTag,
    pub target: LangTag,
    /// Bypass the cache and always hit the provider
    pub force: bool,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source: LangTag, target: LangTag) -> Self {
        Self {
            text: text.into(),
            source,
            target,
            force: false,
        }
    }
}

/// Text handling applied around every provider call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSettings {
    pub preprocess: PreprocessMode,
    pub output_case: OutputCase,
    pub threshold: f64,
    /// Most translations kept in the cache, 0 disables caching
    pub cache_capacity: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            preprocess: PreprocessMode::default(),
            output_case: OutputCase::default(),
            threshold: fanyi_core::DEFAULT_DETECTION_THRESHOLD,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

struct CacheEntry {
    translation: Translation,
    last_used: u64,
}

#[derive(Default)]
struct TranslationCache {
    entries: HashMap<String, CacheEntry>,
    /// Bumped on every hit or insert, orders entries by recency
    clock: u64,
}

impl TranslationCache {
    fn get(&mut self, key: &str) -> Option<Translation> {
        self.clock += 1;
        let entry = self.entries.get_mut(key)?;
        entry.last_used = self.clock;
        Some(entry.translation.clone())
    }

    fn insert(&mut self, key: String, translation: Translation, capacity: usize) {
        if capacity == 0 {
            return;
        }

        self.clock += 1;
        if !self.entries.contains_key(&key) {
            self.evict_to(capacity - 1);
        }
        self.entries.insert(
            key,
            CacheEntry {
                translation,
                last_used: self.clock,
            },
        );
    }

    /// Drop least recently used entries until at most `len` remain
    fn evict_to(&mut self, len: usize) {
        while self.entries.len() > len {
            let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            tracing::debug!("[PIPELINE] Evicting cached translation {}", oldest);
            self.entries.remove(&oldest);
        }
    }
}

/// Cleans input, picks languages and runs it through a provider
pub struct TranslationPipeline {
    translator: Box<dyn Translator>,
    settings: RwLock<PipelineSettings>,
    cache: RwLock<TranslationCache>,
}

impl TranslationPipeline {
    pub fn new(translator: Box<dyn Translator>, settings: PipelineSettings) -> Self {
        Self {
            translator,
            settings: RwLock::new(settings),
            cache: RwLock::new(TranslationCache::default()),
        }
    }

    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    pub async fn settings(&self) -> PipelineSettings {
        *self.settings.read().await
    }

    /// Swap in new settings. Cached results were produced under the old ones,
    /// so the cache is dropped.
    pub async fn reconfigure(&self, settings: PipelineSettings) {
        *self.settings.write().await = settings;
        self.clear_cache().await;
        tracing::info!(
            "[PIPELINE] Reconfigured: {:?}, {:?}, threshold {}",
            settings.preprocess,
            settings.output_case,
            settings.threshold
        );
    }

    /// Preprocessed text and the language pair it would be translated with
    pub async fn prepare(&self, request: &TranslationRequest) -> (String, LanguagePair) {
        let settings = self.settings().await;
        prepare_with(&settings, request)
    }

    pub async fn translate(
        &self,
        request: TranslationRequest,
    ) -> Result<Translation, TranslateError> {
        let settings = self.settings().await;
        let (text, pair) = prepare_with(&settings, &request);
        if text.is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        for lang in [pair.source, pair.target] {
            if !self.translator.supports(lang) {
                return Err(TranslateError::UnsupportedLanguage(lang));
            }
        }

        let key = cache_key(&text, pair);

        if !request.force
            && let Some(hit) = self.cache.write().await.get(&key)
        {
            tracing::debug!("[PIPELINE] Cache hit for {}", key);
            return Ok(hit);
        }

        tracing::info!("[PIPELINE] Translating {} -> {}", pair.source, pair.target);
        let mut translation = self
            .translator
            .translate(&text, pair.source, pair.target)
            .await?;
        translation.text = settings.output_case.apply(&translation.text);

        self.cache
            .write()
            .await
            .insert(key, translation.clone(), settings.cache_capacity);

        Ok(translation)
    }

    pub async fn clear_cache(&self) {
        self.cache.write().await.entries.clear();
    }

    pub async fn cached_len(&self) -> usize {
        self.cache.read().await.entries.len()
    }
}

fn prepare_with(
    settings: &PipelineSettings,
    request: &TranslationRequest,
) -> (String, LanguagePair) {
    let text = settings.preprocess.process(&request.text);
    let pair = resolve_languages(&text, request.source, request.target, settings.threshold);
    (text, pair)
}

fn cache_key(text: &str, pair: LanguagePair) -> String {
    digest(&format!("{}|{}|{}", pair.source, pair.target, text))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::ProviderMetadata;

    /// Echoes the input uppercased and counts calls
    struct EchoTranslator {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate(
            &self,
            text: &str,
            from: LangTag,
            to: LangTag,
        ) -> Result<Translation, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Translation {
                text: text.to_uppercase(),
                from,
                to,
                provider: "echo".to_string(),
            })
        }

        fn supports(&self, lang: LangTag) -> bool {
            lang != LangTag::Km
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                id: Uuid::nil(),
                name: "Echo".to_string(),
                requires_api_key: false,
                free_tier_available: true,
            }
        }
    }

    fn pipeline(
        preprocess: PreprocessMode,
        output_case: OutputCase,
    ) -> (TranslationPipeline, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let translator = EchoTranslator {
            calls: calls.clone(),
        };
        (
            TranslationPipeline::new(
                Box::new(translator),
                PipelineSettings {
                    preprocess,
                    output_case,
                    threshold: 0.8,
                    cache_capacity: DEFAULT_CACHE_CAPACITY,
                },
            ),
            calls,
        )
    }

    #[tokio::test]
    async fn test_auto_languages_are_resolved() {
        let (pipeline, _) = pipeline(PreprocessMode::Selection, OutputCase::None);

        let result = pipeline
            .translate(TranslationRequest::new("  hello\n world ", LangTag::Auto, LangTag::Auto))
            .await
            .unwrap();

        assert_eq!(result.text, "HELLO WORLD");
        assert_eq!(result.from, LangTag::En);
        assert_eq!(result.to, LangTag::ZhCn);
    }

    #[tokio::test]
    async fn test_output_case_is_applied() {
        let (pipeline, _) = pipeline(PreprocessMode::Selection, OutputCase::Snake);

        let result = pipeline
            .translate(TranslationRequest::new("get user name", LangTag::En, LangTag::ZhCn))
            .await
            .unwrap();

        assert_eq!(result.text, "get_user_name");
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let (pipeline, calls) = pipeline(PreprocessMode::Selection, OutputCase::None);

        let result = pipeline
            .translate(TranslationRequest::new(" \r\n\t", LangTag::Auto, LangTag::Auto))
            .await;

        assert!(matches!(result, Err(TranslateError::EmptyInput)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsupported_language_is_rejected() {
        let (pipeline, calls) = pipeline(PreprocessMode::None, OutputCase::None);

        let result = pipeline
            .translate(TranslationRequest::new("hello", LangTag::En, LangTag::Km))
            .await;

        assert!(matches!(
            result,
            Err(TranslateError::UnsupportedLanguage(LangTag::Km))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cache_and_force() {
        let (pipeline, calls) = pipeline(PreprocessMode::Selection, OutputCase::None);
        let request = TranslationRequest::new("你好", LangTag::Auto, LangTag::Auto);

        let first = pipeline.translate(request.clone()).await.unwrap();
        let second = pipeline.translate(request.clone()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(pipeline.cached_len().await, 1);

        let forced = TranslationRequest {
            force: true,
            ..request
        };
        pipeline.translate(forced).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        pipeline.clear_cache().await;
        assert_eq!(pipeline.cached_len().await, 0);
    }

    #[tokio::test]
    async fn test_whitespace_variants_share_cache_entry() {
        let (pipeline, calls) = pipeline(PreprocessMode::Selection, OutputCase::None);

        pipeline
            .translate(TranslationRequest::new("hello world", LangTag::Auto, LangTag::Auto))
            .await
            .unwrap();
        pipeline
            .translate(TranslationRequest::new("hello\n\nworld  ", LangTag::Auto, LangTag::Auto))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_prepare_paragraph() {
        let (pipeline, _) = pipeline(PreprocessMode::Paragraph, OutputCase::None);
        let request = TranslationRequest::new("第一句。\n第二句", LangTag::Auto, LangTag::Auto);

        let (text, pair) = pipeline.prepare(&request).await;
        assert_eq!(text, "第一句。\n第二句");
        assert_eq!(pair, LanguagePair::new(LangTag::ZhCn, LangTag::En));
    }

    #[tokio::test]
    async fn test_cache_is_bounded() {
        let (pipeline, calls) = pipeline(PreprocessMode::Selection, OutputCase::None);
        pipeline
            .reconfigure(PipelineSettings {
                cache_capacity: 3,
                ..pipeline.settings().await
            })
            .await;

        for i in 0..10 {
            pipeline
                .translate(TranslationRequest::new(format!("clip {i}"), LangTag::En, LangTag::ZhCn))
                .await
                .unwrap();
        }
        assert_eq!(pipeline.cached_len().await, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_least_recently_used_is_evicted() {
        let (pipeline, calls) = pipeline(PreprocessMode::Selection, OutputCase::None);
        pipeline
            .reconfigure(PipelineSettings {
                cache_capacity: 2,
                ..pipeline.settings().await
            })
            .await;
        let request = |text: &str| TranslationRequest::new(text, LangTag::En, LangTag::ZhCn);

        pipeline.translate(request("a")).await.unwrap();
        pipeline.translate(request("b")).await.unwrap();
        // touch "a" so "b" is the oldest
        pipeline.translate(request("a")).await.unwrap();
        pipeline.translate(request("c")).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        pipeline.translate(request("a")).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        pipeline.translate(request("b")).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_zero_capacity_disables_cache() {
        let (pipeline, calls) = pipeline(PreprocessMode::Selection, OutputCase::None);
        pipeline
            .reconfigure(PipelineSettings {
                cache_capacity: 0,
                ..pipeline.settings().await
            })
            .await;

        let request = TranslationRequest::new("hello", LangTag::En, LangTag::ZhCn);
        pipeline.translate(request.clone()).await.unwrap();
        pipeline.translate(request).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(pipeline.cached_len().await, 0);
    }

    #[tokio::test]
    async fn test_reconfigure_changes_output_and_clears_cache() {
        let (pipeline, _) = pipeline(PreprocessMode::Selection, OutputCase::None);
        let request = TranslationRequest::new("get user", LangTag::En, LangTag::ZhCn);

        assert_eq!(pipeline.translate(request.clone()).await.unwrap().text, "GET USER");
        assert_eq!(pipeline.cached_len().await, 1);

        pipeline
            .reconfigure(PipelineSettings {
                output_case: OutputCase::Snake,
                ..pipeline.settings().await
            })
            .await;
        assert_eq!(pipeline.cached_len().await, 0);
        assert_eq!(pipeline.translate(request).await.unwrap().text, "get_user");
    }
}
