use std::sync::Arc;

use fanyi_config::Config;
use fanyi_config::display::DisplayConfig;
use fanyi_core::types::AppEvent;
use kanal::AsyncReceiver;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Print results coming out of the event loop
pub async fn display_loop(
    app_to_display_rx: AsyncReceiver<AppEvent>,
    config: Arc<RwLock<Config>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        let event = tokio::select! {
            event = app_to_display_rx.recv() => event?,
            _ = cancel.cancelled() => {
                tracing::info!("Display loop stopping");
                return Ok(());
            }
        };

        if let AppEvent::TranslationFailed(message) = &event {
            tracing::warn!("Translation failed: {}", message);
            continue;
        }

        let display = config.read().await.display.clone();
        if let Some(rendered) = render(&event, &display) {
            println!("{rendered}");
        }
    }
}

pub fn render(event: &AppEvent, display: &DisplayConfig) -> Option<String> {
    match event {
        AppEvent::ShowTranslation {
            text,
            from,
            to,
            provider,
        } => {
            let body = limit_lines(text, display.max_text_lines);
            if display.show_source {
                Some(format!("[{from} -> {to} via {provider}]\n{body}"))
            } else {
                Some(body)
            }
        }
        AppEvent::ShowInput(text) => Some(limit_lines(text, display.max_text_lines)),
        _ => None,
    }
}

fn limit_lines(text: &str, max_lines: u32) -> String {
    if max_lines == 0 {
        return text.to_string();
    }

    let lines: Vec<&str> = text.lines().collect();
    let max = max_lines as usize;
    if lines.len() <= max {
        return text.to_string();
    }

    let mut out = lines[..max].join("\n");
    out.push_str("\n…");
    out
}

#[cfg(test)]
mod tests {
    use fanyi_core::LangTag;

    use super::*;

    fn translation(text: &str) -> AppEvent {
        AppEvent::ShowTranslation {
            text: text.to_string(),
            from: LangTag::En,
            to: LangTag::ZhCn,
            provider: "deepl".to_string(),
        }
    }

    #[test]
    fn test_render_translation_with_source() {
        let display = DisplayConfig::default();
        assert_eq!(
            render(&translation("你好"), &display).unwrap(),
            "[en -> zh_cn via deepl]\n你好"
        );
    }

    #[test]
    fn test_render_truncates_lines() {
        let display = DisplayConfig {
            max_text_lines: 2,
            show_source: false,
        };
        assert_eq!(
            render(&translation("a\nb\nc"), &display).unwrap(),
            "a\nb\n…"
        );
        assert_eq!(
            render(&AppEvent::ShowInput("a\nb".to_string()), &display).unwrap(),
            "a\nb"
        );
    }

    #[test]
    fn test_render_no_limit() {
        let display = DisplayConfig {
            max_text_lines: 0,
            show_source: false,
        };
        assert_eq!(
            render(&translation("1\n2\n3\n4"), &display).unwrap(),
            "1\n2\n3\n4"
        );
    }

    #[test]
    fn test_render_ignores_inputs() {
        let display = DisplayConfig::default();
        assert!(render(&AppEvent::ConfigChanged, &display).is_none());
        assert!(render(&AppEvent::PlaceInput("x".to_string()), &display).is_none());
    }
}
