//! Google Cloud Translation (v2, "basic") client.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

use crate::TextTranslator;
use crate::error::{TranslationError, excerpt};

/// Public endpoint of the v2 translate method
pub const DEFAULT_TRANSLATION_ENDPOINT: &str =
    "https://translation.googleapis.com/language/translate/v2";

#[derive(Clone)]
pub struct GoogleTranslateClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GoogleTranslateClient {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            endpoint: DEFAULT_TRANSLATION_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl TextTranslator for GoogleTranslateClient {
    async fn translate_text(
        &self,
        text: &str,
        target: &str,
        source: Option<&str>,
    ) -> Result<String, TranslationError> {
        debug!("Translating {} chars to '{}'", text.len(), target);

        // Plain text, otherwise v2 answers with HTML entities
        let mut form = vec![
            ("q", text),
            ("target", target),
            ("format", "text"),
            ("key", self.api_key.as_str()),
        ];
        if let Some(source) = source {
            form.push(("source", source));
        }

        let response = self
            .http
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!("Translation request failed: {}", e);
                TranslationError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let payload: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Decode(e.without_url().to_string()))?;

        payload
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or(TranslationError::Empty)
    }
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}
