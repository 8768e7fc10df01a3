//! Language-model calls that read intent from user text, plus the optional
//! result summary.
//!
//! Model failures are logged and reported as a parse miss or `None`; they
//! never abort a request.

use localguide_core::Place;
use localguide_llm::{parse_keyword, parse_place_name, prompts, KeywordParse, LanguageModel, PlaceNameParse};

pub struct IntentExtractor<M> {
    model: M,
}

impl<M: LanguageModel> IntentExtractor<M> {
    #[must_use]
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Asks for a single `keyword:` line and parses it strictly.
    pub async fn extract_keyword(&self, user_text: &str) -> KeywordParse {
        if user_text.trim().is_empty() {
            return KeywordParse::NoKeyword;
        }
        match self
            .model
            .complete(prompts::KEYWORD_SYSTEM, &prompts::keyword_user(user_text))
            .await
        {
            Ok(output) => {
                let parsed = parse_keyword(&output);
                if parsed == KeywordParse::NoKeyword {
                    tracing::debug!(output = %output, "model output had no usable keyword");
                }
                parsed
            }
            Err(e) => {
                tracing::warn!(error = %e, "keyword extraction failed");
                KeywordParse::NoKeyword
            }
        }
    }

    /// Asks for a branch-qualified place name in `region` and parses the
    /// `장소명:` line.
    pub async fn extract_qualified_place_name(
        &self,
        region: &str,
        category: &str,
        user_text: &str,
    ) -> PlaceNameParse {
        let user = prompts::place_name_user(region, category, user_text);
        match self.model.complete(prompts::PLACE_NAME_SYSTEM, &user).await {
            Ok(output) => {
                let parsed = parse_place_name(&output);
                if parsed == PlaceNameParse::Missing {
                    tracing::debug!(output = %output, "model output had no place name line");
                }
                parsed
            }
            Err(e) => {
                tracing::warn!(error = %e, "place name extraction failed");
                PlaceNameParse::Missing
            }
        }
    }

    /// Short narrative about the commercial character of `places`.
    ///
    /// Returns `None` for an empty slice (without a model call), on model
    /// failure, or when the model answers with blank text.
    pub async fn summarize(&self, user_text: &str, places: &[Place]) -> Option<String> {
        if places.is_empty() {
            return None;
        }
        match self
            .model
            .complete(prompts::SUMMARY_SYSTEM, &prompts::summary_user(user_text, places))
            .await
        {
            Ok(text) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "summary generation failed, continuing without it");
                None
            }
        }
    }
}
