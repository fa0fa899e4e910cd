//! Eligibility classification from status fields or free text

use crate::rules::{
    contains_any, eligibility_negation_re, guardrail_negation_re, violation_re,
    APPROVED_STATUS_TOKENS, ELIGIBILITY_POSITIVE, ELIGIBILITY_TERMS, ELIGIBLE_STATUS_TOKENS,
    GUARDRAIL_POSITIVE, GUARDRAIL_TERMS,
};
use crate::types::{Verdict, VerdictAxis};
use serde_json::Value;

/// Verdict from a structured status field
///
/// The value is compared case-insensitively against the positive tokens of
/// its axis; any other string is negative. Non-string values carry no
/// verdict.
pub fn classify_status(axis: VerdictAxis, status: &Value) -> Verdict {
    let Some(status) = status.as_str() else {
        return Verdict::Unknown;
    };

    let normalized = status.trim().to_lowercase();
    let tokens = match axis {
        VerdictAxis::Eligibility => ELIGIBLE_STATUS_TOKENS,
        VerdictAxis::Guardrail => APPROVED_STATUS_TOKENS,
    };

    Verdict::on_axis(axis, tokens.contains(&normalized.as_str()))
}

/// Axis a piece of free text talks about
///
/// Eligibility wording wins; guardrail wording alone selects the guardrail
/// axis; text mentioning neither is judged on eligibility.
pub fn detect_axis(text: &str) -> VerdictAxis {
    let lower = text.to_lowercase();
    if contains_any(&lower, ELIGIBILITY_TERMS) {
        VerdictAxis::Eligibility
    } else if contains_any(&lower, GUARDRAIL_TERMS) {
        VerdictAxis::Guardrail
    } else {
        VerdictAxis::Eligibility
    }
}

/// Verdict from free text
///
/// Positive iff a positive marker is present and no negation marker is.
/// Negation is checked on its own, so "eligible" inside "not eligible" never
/// counts.
pub fn classify_text(text: &str) -> Verdict {
    let lower = text.to_lowercase();
    let axis = detect_axis(&lower);

    let is_positive = match axis {
        VerdictAxis::Eligibility => {
            contains_any(&lower, ELIGIBILITY_POSITIVE)
                && !eligibility_negation_re().is_match(&lower)
        }
        VerdictAxis::Guardrail => {
            contains_any(&lower, GUARDRAIL_POSITIVE) && !is_guardrail_negated(&lower)
        }
    };
    Verdict::on_axis(axis, is_positive)
}

/// Rejection wording, or a violation that is not itself negated
fn is_guardrail_negated(text: &str) -> bool {
    guardrail_negation_re().is_match(text)
        || violation_re()
            .captures_iter(text)
            .any(|caps| caps.get(1).is_none())
}

/// True if a line states a verdict rather than an action
pub fn mentions_verdict(line: &str) -> bool {
    let lower = line.to_lowercase();
    contains_any(&lower, ELIGIBILITY_TERMS)
        || contains_any(&lower, GUARDRAIL_POSITIVE)
        || is_guardrail_negated(&lower)
}
