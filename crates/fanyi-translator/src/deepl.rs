use std::time::Duration;

use async_trait::async_trait;
use fanyi_core::LangTag;
use uuid::Uuid;

use crate::{ProviderMetadata, TranslateError, Translation, Translator};

/// DeepL language code, `None` when DeepL has no match.
///
/// `auto` maps to `Some("auto")` and is left out of the request so DeepL
/// detects the source itself.
pub fn deepl_code(lang: LangTag) -> Option<&'static str> {
    match lang {
        LangTag::Auto => Some("auto"),
        LangTag::ZhCn | LangTag::ZhTw | LangTag::Yue => Some("ZH"),
        LangTag::En => Some("EN"),
        LangTag::Ja => Some("JA"),
        LangTag::Ko => Some("KO"),
        LangTag::Fr => Some("FR"),
        LangTag::Es => Some("ES"),
        LangTag::Ru => Some("RU"),
        LangTag::De => Some("DE"),
        LangTag::It => Some("IT"),
        LangTag::Tr => Some("TR"),
        LangTag::PtPt => Some("PT-PT"),
        LangTag::PtBr => Some("PT-BR"),
        LangTag::Id => Some("ID"),
        LangTag::Ar => Some("AR"),
        LangTag::NbNo | LangTag::NnNo => Some("NB"),
        LangTag::Sv => Some("SV"),
        LangTag::Pl => Some("PL"),
        LangTag::Nl => Some("NL"),
        LangTag::Vi
        | LangTag::Th
        | LangTag::Ms
        | LangTag::Hi
        | LangTag::MnCy
        | LangTag::MnMo
        | LangTag::Km
        | LangTag::Fa
        | LangTag::Uk => None,
    }
}

#[derive(Clone)]
pub struct DeepLTranslator {
    id: Uuid,
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl DeepLTranslator {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            id: Uuid::new_v4(),
            client,
            api_key,
            api_url,
        })
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LangTag,
        to: LangTag,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let source = deepl_code(from).ok_or(TranslateError::UnsupportedLanguage(from))?;
        let target = match deepl_code(to) {
            Some(code) if !to.is_auto() => code,
            _ => return Err(TranslateError::UnsupportedLanguage(to)),
        };

        let mut params = vec![("text", text), ("target_lang", target)];
        if !from.is_auto() {
            params.push(("source_lang", source));
        }

        tracing::debug!("[DEEPL] {} -> {} ({} chars)", source, target, text.chars().count());

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if response.status() == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let translated_text = json["translations"]
            .get(0)
            .and_then(|t| t["text"].as_str())
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        Ok(Translation {
            text: translated_text.to_string(),
            from,
            to,
            provider: "deepl".to_string(),
        })
    }

    fn supports(&self, lang: LangTag) -> bool {
        deepl_code(lang).is_some()
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            id: self.id,
            name: "DeepL".to_string(),
            requires_api_key: true,
            free_tier_available: true,
        }
    }
}
