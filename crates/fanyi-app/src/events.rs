use std::sync::Arc;

use fanyi_config::text::TextConfig;
use fanyi_core::types::AppEvent;
use fanyi_translator::{PipelineSettings, TranslationPipeline};
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod text_input;

use text_input::{handle_place_input, handle_text_input};

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    app_to_display_tx: AsyncSender<AppEvent>,
    pipeline: Option<Arc<TranslationPipeline>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    match &pipeline {
        Some(pipeline) => tracing::info!(
            "[EVENT_LOOP] Translating with {}",
            pipeline.translator().metadata().name
        ),
        None => tracing::warn!("No translator configured, showing cleaned input only"),
    }

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            event = input_rx.recv() => event?,
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Stopping");
                return Ok(());
            }
        };

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );
        handle_events(state.clone(), pipeline.as_deref(), &app_to_display_tx, event).await?;
    }
}

async fn handle_events(
    state: Arc<AppState>,
    pipeline: Option<&TranslationPipeline>,
    app_to_display_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::ConfigChanged => {
            if let Some(pipeline) = pipeline {
                let settings = pipeline_settings(&state.config.read().await.text);
                pipeline.reconfigure(settings).await;
            }
            tracing::info!("Config changed");
        }
        AppEvent::TextInput {
            text,
            source,
            force,
        } => {
            tracing::debug!("TextInput from {:?}: {} chars", source, text.chars().count());

            handle_text_input(state, text, force, pipeline, app_to_display_tx).await?;
        }
        AppEvent::PlaceInput(text) => {
            handle_place_input(state, text, app_to_display_tx).await?;
        }
        AppEvent::ShowInput(_)
        | AppEvent::ShowTranslation { .. }
        | AppEvent::TranslationFailed(_) => {
            // Display-side events, ignore in backend
        }
    }

    Ok(())
}

pub fn pipeline_settings(text: &TextConfig) -> PipelineSettings {
    PipelineSettings {
        preprocess: text.preprocess,
        output_case: text.output_case,
        threshold: text.detection_threshold,
        cache_capacity: text.cache_capacity,
    }
}
