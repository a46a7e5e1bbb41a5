use std::sync::Arc;
use std::time::Duration;

use fanyi_core::types::{AppEvent, TextSource};
use fanyi_io::{CallHandler, ExternalCallAction, ExternalCallService};
use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Watch the clipboard and the external-call listener, feeding text into the
/// event loop until cancelled
pub async fn watcher_io(
    state: Arc<AppState>,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (listen_to_clipboard, delta_time, external_call) = {
        let config = state.config.read().await;
        (
            config.listen_to_clipboard,
            Duration::from_millis(config.delta_time),
            config.external_call.clone(),
        )
    };

    let mut service = ExternalCallService::new();
    if external_call.enabled {
        let started = service
            .start(
                &external_call.bind_addr(),
                false,
                external_call_handler(event_tx.clone()),
            )
            .await;
        match started {
            Ok(_) => tracing::info!("External calls accepted at {}", external_call.prefix()),
            // the clipboard keeps working without the listener
            Err(e) => tracing::error!("External call listener disabled: {}", e),
        }
    }

    if listen_to_clipboard {
        tracing::info!("Starting clipboard watcher");

        let tx = event_tx.clone();
        tokio::select! {
            result = fanyi_io::clipboard::watch_clipboard(delta_time, move |text| {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let event = AppEvent::TextInput {
                        text,
                        source: TextSource::Clipboard,
                        force: false,
                    };
                    if let Err(e) = tx.send(event).await {
                        tracing::error!("Failed to send clipboard text to app: {}", e);
                    }
                });
            }) => {
                if let Err(e) = result {
                    tracing::error!("Clipboard watcher error: {}", e);
                }
                // keep serving external calls after the clipboard gives up
                cancel.cancelled().await;
            }
            _ = cancel.cancelled() => {
                tracing::info!("Clipboard watcher stopping");
            }
        }
    } else {
        cancel.cancelled().await;
    }

    service.stop().await;

    Ok(())
}

pub fn external_call_handler(event_tx: AsyncSender<AppEvent>) -> CallHandler {
    Arc::new(move |action, text| {
        let tx = event_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tx.send(external_call_event(action, text)).await {
                tracing::error!("Failed to send external call to app: {}", e);
            }
        });
    })
}

pub fn external_call_event(action: ExternalCallAction, text: String) -> AppEvent {
    match action {
        ExternalCallAction::Translate => AppEvent::TextInput {
            text,
            source: TextSource::ExternalCall,
            force: false,
        },
        ExternalCallAction::TranslateForce => AppEvent::TextInput {
            text,
            source: TextSource::ExternalCall,
            force: true,
        },
        ExternalCallAction::TranslateInput => AppEvent::PlaceInput(text),
    }
}
