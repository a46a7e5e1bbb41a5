use std::sync::Arc;

use fanyi_core::types::AppEvent;
use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

use crate::profile::load_profile;
use crate::state::AppState;

/// Re-read the startup profile into the shared config.
///
/// Returns `false` when the app runs on defaults and there is nothing to
/// re-read. An unreadable or invalid profile leaves the current config alone.
pub async fn reload_config(state: &AppState) -> anyhow::Result<bool> {
    let Some(path) = &state.profile_path else {
        return Ok(false);
    };

    let profile = load_profile(path)?;
    profile.value.validate()?;

    *state.config.write().await = profile.value;
    tracing::info!("Reloaded profile '{}' from {}", profile.name, path.display());

    Ok(true)
}

/// Reload the profile on SIGHUP and tell the event loop about it
pub async fn watch_reload(
    state: Arc<AppState>,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut hangup = signal(SignalKind::hangup())?;
        loop {
            tokio::select! {
                _ = hangup.recv() => match reload_config(&state).await {
                    Ok(true) => event_tx.send(AppEvent::ConfigChanged).await?,
                    Ok(false) => tracing::warn!("SIGHUP received but no profile to reload"),
                    Err(e) => tracing::error!("Profile reload failed, keeping current config: {e:#}"),
                },
                _ = cancel.cancelled() => {
                    tracing::info!("Reload watcher stopping");
                    return Ok(());
                }
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = (state, event_tx);
        cancel.cancelled().await;
        Ok(())
    }
}
