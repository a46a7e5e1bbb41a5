use std::time::Duration;

use arboard::Clipboard;
use tokio::time;

/// Poll the clipboard and report each new, non-empty text.
///
/// Whatever is on the clipboard at startup is treated as already seen.
pub async fn watch_clipboard<F>(
    poll_interval: Duration,
    mut on_text: F,
) -> Result<(), anyhow::Error>
where
    F: FnMut(String) + Send + 'static,
{
    let mut clipboard = Clipboard::new()?;
    let mut last_text = clipboard.get_text().unwrap_or_default();

    let mut interval = time::interval(poll_interval);
    interval.set_missed_tick_behavior(time::MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        match clipboard.get_text() {
            Ok(text) if is_new_text(&text, &last_text) => {
                last_text = text.clone();
                on_text(text);
            }
            Ok(_) => {}
            Err(arboard::Error::ContentNotAvailable) => {}
            Err(e) => tracing::debug!("Clipboard read failed: {}", e),
        }
    }
}

fn is_new_text(text: &str, last_text: &str) -> bool {
    !text.trim().is_empty() && text != last_text
}
