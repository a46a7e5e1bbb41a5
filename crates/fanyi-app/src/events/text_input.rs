use std::sync::Arc;

use fanyi_core::types::AppEvent;
use fanyi_core::{Preprocessor, resolve_languages};
use fanyi_translator::{TranslateError, TranslationPipeline, TranslationRequest};
use kanal::AsyncSender;

use crate::state::AppState;

pub async fn handle_text_input(
    state: Arc<AppState>,
    text: String,
    force: bool,
    pipeline: Option<&TranslationPipeline>,
    app_to_display_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (from_lang, to_lang) = {
        let config = state.config.read().await;
        (config.translator.from_lang, config.translator.to_lang)
    };

    let Some(pipeline) = pipeline else {
        let (preprocess, threshold) = {
            let config = state.config.read().await;
            (config.text.preprocess, config.text.detection_threshold)
        };
        let cleaned = preprocess.process(&text);
        if cleaned.is_empty() {
            tracing::debug!("Input empty after preprocessing, skipping");
            return Ok(());
        }

        let pair = resolve_languages(&cleaned, from_lang, to_lang, threshold);
        tracing::info!("Detected {} -> {}", pair.source, pair.target);
        app_to_display_tx.send(AppEvent::ShowInput(cleaned)).await?;
        return Ok(());
    };

    let request = TranslationRequest {
        text,
        source: from_lang,
        target: to_lang,
        force,
    };

    let event = match pipeline.translate(request).await {
        Ok(translation) => AppEvent::ShowTranslation {
            text: translation.text,
            from: translation.from,
            to: translation.to,
            provider: translation.provider,
        },
        Err(TranslateError::EmptyInput) => {
            tracing::debug!("Input empty after preprocessing, skipping");
            return Ok(());
        }
        Err(e) => {
            tracing::error!("Translation failed: {}", e);
            AppEvent::TranslationFailed(e.to_string())
        }
    };

    app_to_display_tx.send(event).await?;

    Ok(())
}

/// Clean up text for display without translating it
pub async fn handle_place_input(
    state: Arc<AppState>,
    text: String,
    app_to_display_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let preprocess = state.config.read().await.text.preprocess;
    let cleaned = preprocess.process(&text);
    tracing::debug!("Placed input: '{}'", cleaned);

    app_to_display_tx.send(AppEvent::ShowInput(cleaned)).await?;

    Ok(())
}
