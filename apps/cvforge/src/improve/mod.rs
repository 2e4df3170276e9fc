//! Asks the language model to rewrite one CV field.
//!
//! The adapter itself is stateless: `improve_text` builds a prompt, makes one
//! call, and trims the reply. Which field is being rewritten, and whether a
//! rewrite is in flight, is tracked by the session (see `tracker`).

pub mod handlers;
pub mod tracker;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm_client::prompts::{REWRITER_SYSTEM, STYLE_INSTRUCTION, VERBATIM_OUTPUT_INSTRUCTION};
use crate::llm_client::{LlmError, TextGenerator};

pub use tracker::{FieldKey, ImproveField, ImproveStatus, ImproveTracker};

/// What kind of text is being rewritten. Selects the prompt phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImproveContext {
    Summary,
    Experience,
    Other,
}

impl ImproveContext {
    /// `"summary"` and `"experience"` are recognised; every other tag is `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "summary" => ImproveContext::Summary,
            "experience" => ImproveContext::Experience,
            _ => ImproveContext::Other,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ImproveContext::Summary => "a professional summary for a CV",
            ImproveContext::Experience => {
                "a job description for a CV, highlighting achievements and skills"
            }
            ImproveContext::Other => "a piece of text for a CV",
        }
    }
}

/// Which field of the record a rewrite targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum ImproveTarget {
    Summary,
    Experience { id: String },
    Education { id: String },
}

impl ImproveTarget {
    /// The field tag, as sent on the wire.
    pub fn tag(&self) -> &'static str {
        match self {
            ImproveTarget::Summary => "summary",
            ImproveTarget::Experience { .. } => "experience",
            ImproveTarget::Education { .. } => "education",
        }
    }

    pub fn context(&self) -> ImproveContext {
        ImproveContext::from_tag(self.tag())
    }

    pub fn key(&self) -> FieldKey {
        match self {
            ImproveTarget::Summary => FieldKey::new(ImproveField::Summary, None),
            ImproveTarget::Experience { id } => {
                FieldKey::new(ImproveField::ExperienceDescription, Some(id.clone()))
            }
            ImproveTarget::Education { id } => {
                FieldKey::new(ImproveField::EducationDescription, Some(id.clone()))
            }
        }
    }
}

pub fn build_prompt(text: &str, context: ImproveContext) -> String {
    format!(
        "Rewrite the following text to be more impactful and professional for {}.\n\
         {STYLE_INSTRUCTION}\n\
         {VERBATIM_OUTPUT_INSTRUCTION}\n\
         \n\
         Original text: \"{text}\"",
        context.description()
    )
}

/// One rewrite. The reply is trimmed and otherwise returned verbatim.
pub async fn improve_text(
    generator: &dyn TextGenerator,
    text: &str,
    context: ImproveContext,
) -> Result<String, LlmError> {
    let prompt = build_prompt(text, context);
    let improved = generator.generate(REWRITER_SYSTEM, &prompt).await?;
    debug!(?context, chars = improved.len(), "text improved");
    Ok(improved.trim().to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns a fixed reply and records every prompt it receives.
    pub(crate) struct StubGenerator {
        pub reply: Result<String, u16>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl StubGenerator {
        pub(crate) fn replying(reply: &str) -> Self {
            StubGenerator {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(status: u16) -> Self {
            StubGenerator {
                reply: Err(status),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, _system: &str, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "upstream unavailable".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_context_from_tag() {
        assert_eq!(ImproveContext::from_tag("summary"), ImproveContext::Summary);
        assert_eq!(ImproveContext::from_tag("Experience"), ImproveContext::Experience);
        assert_eq!(ImproveContext::from_tag("education"), ImproveContext::Other);
        assert_eq!(ImproveContext::from_tag(""), ImproveContext::Other);
    }

    #[test]
    fn test_prompt_phrasing_differs_per_context() {
        let summary = build_prompt("x", ImproveContext::Summary);
        let experience = build_prompt("x", ImproveContext::Experience);
        let other = build_prompt("x", ImproveContext::Other);
        assert!(summary.contains("professional summary"));
        assert!(experience.contains("job description"));
        assert!(other.contains("a piece of text for a CV"));
        assert_ne!(summary, experience);
        assert_ne!(experience, other);
    }

    #[test]
    fn test_prompt_quotes_original_and_forbids_preamble() {
        let prompt = build_prompt("Built X.\nShipped Y.", ImproveContext::Experience);
        assert!(prompt.contains("Original text: \"Built X.\nShipped Y.\""));
        assert!(prompt.contains("Return only the rewritten text."));
    }

    #[test]
    fn test_target_keys_and_contexts() {
        let target = ImproveTarget::Experience {
            id: "exp-1".to_string(),
        };
        assert_eq!(target.context(), ImproveContext::Experience);
        assert_eq!(
            target.key(),
            FieldKey::new(ImproveField::ExperienceDescription, Some("exp-1".to_string()))
        );
        assert_eq!(ImproveTarget::Summary.key().entry_id, None);
        assert_eq!(
            ImproveTarget::Education { id: "edu-1".to_string() }.context(),
            ImproveContext::Other
        );
    }

    #[test]
    fn test_target_json_shape() {
        let target: ImproveTarget =
            serde_json::from_str(r#"{"field":"experience","id":"exp-1"}"#).unwrap();
        assert_eq!(
            target,
            ImproveTarget::Experience {
                id: "exp-1".to_string()
            }
        );
        let summary: ImproveTarget = serde_json::from_str(r#"{"field":"summary"}"#).unwrap();
        assert_eq!(summary, ImproveTarget::Summary);
    }

    #[tokio::test]
    async fn test_improve_text_trims_reply() {
        let generator = StubGenerator::replying("  Improved text \n");
        let improved = improve_text(&generator, "text", ImproveContext::Summary)
            .await
            .unwrap();
        assert_eq!(improved, "Improved text");
        assert_eq!(generator.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_improve_text_keeps_fenced_reply_verbatim() {
        let generator = StubGenerator::replying("\n```\nLed a team of five.\n```  ");
        let improved = improve_text(&generator, "text", ImproveContext::Experience)
            .await
            .unwrap();
        assert_eq!(improved, "```\nLed a team of five.\n```");
    }

    #[tokio::test]
    async fn test_improve_text_blank_reply_becomes_empty() {
        let generator = StubGenerator::replying("   \n");
        let improved = improve_text(&generator, "text", ImproveContext::Summary)
            .await
            .unwrap();
        assert_eq!(improved, "");
    }

    #[tokio::test]
    async fn test_improve_text_propagates_failure() {
        let generator = StubGenerator::failing(503);
        let err = improve_text(&generator, "text", ImproveContext::Other)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 503, .. }));
    }
}
