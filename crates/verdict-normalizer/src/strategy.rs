//! Extraction strategies, tried in a fixed order

use crate::categorizer::RecommendationCategorizer;
use crate::classifier::{classify_status, classify_text, mentions_verdict};
use crate::config::NormalizerConfig;
use crate::error::NormalizerError;
use crate::payload::{
    displayable_text, is_structured, parse_arguments, PayloadShape, RESOURCE_FIELDS,
};
use crate::rules::{
    efficiency_score_re, recommendation_cue_re, resource_label_re, sizing_change_re, tier_re,
};
use crate::segmenter::TextSegmenter;
use crate::summary::SummaryExtractor;
use crate::types::{AnalysisBuilder, VerdictAxis, Verdict};
use serde_json::{Map, Value};
use std::fmt;

/// Fields read as the justification, in order
const JUSTIFICATION_FIELDS: &[&str] = &["reasoning", "motivos", "tier_justification", "justification"];

/// Fields holding an explicit list of reasons
const REASON_LIST_FIELDS: &[&str] = &["motivos", "reasons"];

/// One extraction algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Fields read directly from the top-level object
    DirectStructured,
    /// Structured fields inside a tool invocation's JSON arguments
    ToolCallWrapped,
    /// Heuristics over model prose
    LegacyFreeText,
}

impl Strategy {
    /// Strategies in the order they are tried
    pub const CHAIN: [Strategy; 3] = [
        Strategy::DirectStructured,
        Strategy::ToolCallWrapped,
        Strategy::LegacyFreeText,
    ];

    /// Short name for logs and output
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::DirectStructured => "direct-structured",
            Strategy::ToolCallWrapped => "tool-call",
            Strategy::LegacyFreeText => "free-text",
        }
    }

    /// Run this strategy; `Err` hands control to the next one
    pub(crate) fn attempt(
        &self,
        payload: &Value,
        shape: &PayloadShape<'_>,
        toolkit: &Toolkit,
    ) -> Result<AnalysisBuilder, NormalizerError> {
        match (self, shape) {
            (Strategy::DirectStructured, PayloadShape::Structured(map)) => {
                Ok(extract_structured(map, toolkit))
            }
            (Strategy::ToolCallWrapped, PayloadShape::ToolCall { arguments, .. }) => {
                toolkit.check_size(arguments.chars().count())?;
                let map = parse_arguments(arguments)?;
                if !is_structured(&map) {
                    return Err(NormalizerError::NotApplicable(
                        "tool-call arguments carry no resource and status fields".to_string(),
                    ));
                }
                Ok(extract_structured(&map, toolkit))
            }
            (Strategy::LegacyFreeText, _) => {
                let text = displayable_text(payload)?;
                toolkit.check_size(text.chars().count())?;
                Ok(extract_free_text(&text, toolkit))
            }
            (strategy, shape) => Err(NormalizerError::NotApplicable(format!(
                "{} does not handle {} payloads",
                strategy.name(),
                shape.kind()
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Components shared by the strategies, built once per normalizer
pub(crate) struct Toolkit {
    segmenter: TextSegmenter,
    categorizer: RecommendationCategorizer,
    summary: SummaryExtractor,
    max_payload_chars: usize,
}

impl Toolkit {
    pub fn from_config(config: &NormalizerConfig) -> Self {
        Self {
            segmenter: TextSegmenter::from_config(config),
            categorizer: RecommendationCategorizer::from_config(config),
            summary: SummaryExtractor::from_config(config),
            max_payload_chars: config.max_payload_chars,
        }
    }

    fn check_size(&self, chars: usize) -> Result<(), NormalizerError> {
        if chars > self.max_payload_chars {
            return Err(NormalizerError::PayloadTooLarge(chars, self.max_payload_chars));
        }
        Ok(())
    }
}

/// Map direct fields into a record
fn extract_structured(map: &Map<String, Value>, toolkit: &Toolkit) -> AnalysisBuilder {
    let verdict = if let Some(status) = map.get("eligibility_status") {
        classify_status(VerdictAxis::Eligibility, status)
    } else if let Some(status) = map.get("guardrail_status") {
        classify_status(VerdictAxis::Guardrail, status)
    } else {
        Verdict::Unknown
    };

    let justification_text = JUSTIFICATION_FIELDS
        .iter()
        .filter_map(|field| map.get(*field))
        .filter_map(text_of)
        .find(|text| !text.trim().is_empty());

    let justification = justification_text
        .as_deref()
        .map(|text| toolkit.summary.justification_from_field(text));

    let recommendations = match map.get("recommendations") {
        Some(Value::Array(items)) => toolkit
            .categorizer
            .categorize(items.iter().filter_map(Value::as_str)),
        Some(Value::String(text)) => toolkit
            .categorizer
            .categorize(toolkit.segmenter.recommendation_lines(text)),
        _ => Default::default(),
    };

    let reasons = if verdict.is_negative() {
        let listed = REASON_LIST_FIELDS
            .iter()
            .filter_map(|field| map.get(*field).and_then(Value::as_array))
            .find(|items| !items.is_empty());
        match (listed, justification_text.as_deref()) {
            (Some(items), _) => toolkit
                .summary
                .reasons_from_items(items.iter().filter_map(Value::as_str)),
            (None, Some(text)) => toolkit.summary.reasons_from_text(text),
            (None, None) => Vec::new(),
        }
    } else {
        Vec::new()
    };

    let resource_name = RESOURCE_FIELDS
        .iter()
        .filter_map(|field| map.get(*field))
        .find_map(scalar_text);

    AnalysisBuilder::new()
        .resource_name(resource_name)
        .verdict(verdict)
        .justification(justification.unwrap_or_default())
        .efficiency_score(map.get("efficiency_score").and_then(number_of))
        .cost_impact(map.get("cost_impact").and_then(scalar_text))
        .application_tier(map.get("application_tier").and_then(scalar_text))
        .guardrails_text(map.get("guardrails").and_then(scalar_text))
        .reasons(reasons)
        .recommendations(recommendations)
}

/// Heuristic extraction from model prose
fn extract_free_text(text: &str, toolkit: &Toolkit) -> AnalysisBuilder {
    let verdict = classify_text(text);

    let cue = recommendation_cue_re();
    let sizing = sizing_change_re();
    let recommendation_lines = toolkit
        .segmenter
        .recommendation_lines(text)
        .into_iter()
        .filter(|line| (cue.is_match(line) || sizing.is_match(line)) && !mentions_verdict(line));
    let recommendations = toolkit.categorizer.categorize(recommendation_lines);

    let reasons = if verdict.is_negative() {
        toolkit.summary.reasons_from_text(text)
    } else {
        Vec::new()
    };

    let resource_name = resource_label_re()
        .captures(text)
        .map(|caps| caps[1].trim_end_matches(['.', ',', ':']).to_string());

    let application_tier = tier_re()
        .captures(text)
        .map(|caps| format!("Tier {}", &caps[1]));

    let efficiency_score = efficiency_score_re()
        .captures(text)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .and_then(|score| score.as_str().replace(',', ".").parse::<f64>().ok());

    AnalysisBuilder::new()
        .resource_name(resource_name)
        .verdict(verdict)
        .justification(toolkit.summary.justification_from_text(text))
        .efficiency_score(efficiency_score)
        .application_tier(application_tier)
        .reasons(reasons)
        .recommendations(recommendations)
}

/// String content of a field; arrays of strings are joined
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

/// Strings and numbers rendered as text
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numbers, or strings holding a number (`"72"`, `"72.5%"`)
fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().replace(',', ".").parse().ok(),
        _ => None,
    }
}
