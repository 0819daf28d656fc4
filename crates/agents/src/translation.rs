//! Translation agent.
//!
//! The caller always gets displayable text back. On any translation fault
//! the output repeats the original input verbatim and adds the error.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use clients::TextTranslator;
use domain::TranslationRequest;

use crate::traits::{Agent, AgentOutput};

pub const NO_TEXT_ERROR: &str = "No text provided.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateOutput {
    pub translated_text: String,
    pub error: Option<String>,
}

impl AgentOutput for TranslateOutput {
    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

pub struct TranslationAgent {
    translator: Arc<dyn TextTranslator>,
}

impl TranslationAgent {
    pub fn new(translator: Arc<dyn TextTranslator>) -> Self {
        Self { translator }
    }
}

impl fmt::Debug for TranslationAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TranslationAgent(name={})", self.name())
    }
}

#[async_trait]
impl Agent for TranslationAgent {
    type Input = TranslationRequest;
    type Output = TranslateOutput;

    fn name(&self) -> &str {
        "Translator"
    }

    async fn process(&self, input: TranslationRequest) -> TranslateOutput {
        if input.text.is_empty() {
            return TranslateOutput {
                translated_text: String::new(),
                error: Some(NO_TEXT_ERROR.to_string()),
            };
        }

        info!(agent = self.name(), target_language = %input.target_language, "Translating");

        match self
            .translator
            .translate_text(
                &input.text,
                &input.target_language,
                input.source_language.as_deref(),
            )
            .await
        {
            Ok(translated_text) => TranslateOutput {
                translated_text,
                error: None,
            },
            Err(e) => {
                warn!(agent = self.name(), error = %e, "Translation failed, returning original text");
                TranslateOutput {
                    translated_text: input.text,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
