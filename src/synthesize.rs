//! The synthesize module hands an aggregated payload to an LLM and returns its answer.

use anyhow::Result;
use llm::chat::{ChatMessage, ChatProvider};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::aggregate::AnswerPayload;
use crate::constants::{DEFAULT_PROMPT_TEMPLATE, THINK_STRIPPER};

static THINK_STRIPPER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(THINK_STRIPPER).expect("Failed to compile THINK_STRIPPER regex"));

/// Renders the single prompt sent for `question`.
pub fn build_prompt(question: &str, payload: &AnswerPayload) -> String {
    let stats = if payload.stats.is_empty() {
        "none".to_string()
    } else {
        payload
            .stats
            .iter()
            .map(|(stat, value)| format!("- {stat}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let sources = if payload.sources.is_empty() {
        "none".to_string()
    } else {
        payload
            .sources
            .iter()
            .map(|url| format!("- {url}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    DEFAULT_PROMPT_TEMPLATE
        .replace("{stats}", &stats)
        .replace("{sources}", &sources)
        .replace("{text}", &payload.combined_text)
        .replace("{question}", question)
}

/// Asks `model` to answer `question` from `payload`.
///
/// # Arguments
///
/// * `model` - Chat model to query
/// * `question` - The user's question, verbatim
/// * `payload` - Aggregated website content for the question
///
/// # Returns
///
/// Returns the model's answer with any `<think>` block removed
///
/// # Errors
///
/// Returns an error if the chat request fails
pub async fn synthesize(
    model: &dyn ChatProvider,
    question: &str,
    payload: &AnswerPayload,
) -> Result<String> {
    let prompt = build_prompt(question, payload);
    debug!("Prompt is {} characters long", prompt.chars().count());

    let messages = vec![ChatMessage::user().content(prompt).build()];

    let response = model
        .chat(&messages)
        .await
        .map_err(|err| anyhow::anyhow!("LLM error: {err}."))?
        .to_string();

    Ok(THINK_STRIPPER_REGEX
        .replace_all(&response, "")
        .trim()
        .to_owned())
}
