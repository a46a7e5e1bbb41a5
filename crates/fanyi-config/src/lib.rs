use std::env;

use serde::{Deserialize, Serialize};

use self::display::DisplayConfig;
use self::external_call::ExternalCallConfig;
use self::text::TextConfig;
use self::translator::TranslatorConfig;

pub mod display;
pub mod external_call;
pub mod text;
pub mod translator;

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub text: TextConfig,
    pub external_call: ExternalCallConfig,
    pub display: DisplayConfig,

    /// Clipboard polling interval
    pub delta_time: u64,
    pub timeout_seconds: u64,
    /// Watch the clipboard for new text
    pub listen_to_clipboard: bool,
}

impl Config {
    pub fn new() -> Self {
        let delta_time = env::var("DELTA_TIME_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(500); // 500ms default

        let timeout_seconds = env::var("TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30); // 30 seconds default

        Config {
            translator: TranslatorConfig::default(),
            text: TextConfig::default(),
            external_call: ExternalCallConfig::new(),
            display: DisplayConfig::default(),

            delta_time,
            timeout_seconds,
            listen_to_clipboard: true,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.text.detection_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }

        if self.delta_time == 0 {
            return Err(ConfigError::InvalidValue {
                field: "delta_time",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.external_call.enabled && self.external_call.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "external_call.port",
                reason: "must be a fixed port when the listener is enabled".to_string(),
            });
        }

        if self.translator.enabled && self.translator.provider != "deepl" {
            return Err(ConfigError::UnknownProvider(self.translator.provider.clone()));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Detection threshold must be within 0.0..=1.0, got {0}")]
    InvalidThreshold(f64),

    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Unknown translator provider: {0}")]
    UnknownProvider(String),
}

#[cfg(test)]
mod tests {
    use fanyi_core::{LangTag, OutputCase, PreprocessMode};

    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert!(config.listen_to_clipboard);
        assert!(!config.translator.enabled);
        assert_eq!(config.translator.from_lang, LangTag::Auto);
        assert_eq!(config.text.preprocess, PreprocessMode::Selection);
    }

    #[test]
    fn test_partial_profile_fills_defaults() {
        let json = r#"{
            "translator": { "enabled": true, "to_lang": "ja", "api_key": "secret" },
            "text": { "preprocess": "paragraph", "output_case": "small_camel" },
            "listen_to_clipboard": false
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.translator.is_usable());
        assert_eq!(config.translator.provider, "deepl");
        assert_eq!(config.translator.from_lang, LangTag::Auto);
        assert_eq!(config.translator.to_lang, LangTag::Ja);
        assert_eq!(config.text.preprocess, PreprocessMode::Paragraph);
        assert_eq!(config.text.output_case, OutputCase::SmallCamel);
        assert!(!config.listen_to_clipboard);
        assert!(config.display.show_source);
        assert_eq!(config.display.max_text_lines, 3);
        assert_eq!(config.text.cache_capacity, TextConfig::default().cache_capacity);
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let mut config = Config::new();
        config.text.detection_threshold = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_provider() {
        let mut config = Config::new();
        config.translator.enabled = true;
        config.translator.provider = "babelfish".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownProvider(p)) if p == "babelfish"
        ));
    }

    #[test]
    fn test_external_call_addresses() {
        let config = ExternalCallConfig {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 50020,
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:50020");
        assert_eq!(config.prefix(), "http://127.0.0.1:50020/");
    }
}
