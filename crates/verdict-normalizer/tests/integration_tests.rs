//! Integration tests for the normalizer
//!
//! These exercise the public API end to end: payloads in every shape go in,
//! and the canonical record's bounds and invariants are checked on the way
//! out.

use proptest::prelude::*;
use serde_json::{json, Value};
use verdict_normalizer::{
    normalize, parse_raw, Category, Normalizer, NormalizerConfig, PayloadShape, Strategy,
    Verdict, NO_JUSTIFICATION, PROCESSING_FAILED_JUSTIFICATION,
};

fn structured(status: &str, recommendations: Vec<String>, reasoning: &str) -> Value {
    json!({
        "resource_name": "vm-prop",
        "eligibility_status": status,
        "reasoning": reasoning,
        "recommendations": recommendations
    })
}

#[test]
fn test_parse_raw_keeps_plain_text() {
    assert_eq!(parse_raw("Recurso elegível"), json!("Recurso elegível"));
    assert_eq!(
        parse_raw(r#"{"resource_name": "db-01"}"#),
        json!({"resource_name": "db-01"})
    );
}

#[test]
fn test_shapes() {
    let structured = json!({"resource_id": "db-01", "guardrail_status": "approved"});
    assert_eq!(PayloadShape::classify(&structured).kind(), "structured");

    let partial = json!({"resource_name": "db-01"});
    assert_eq!(PayloadShape::classify(&partial).kind(), "unknown");

    let text = json!("free text");
    assert_eq!(PayloadShape::classify(&text).kind(), "free_text");
}

#[test]
fn test_function_call_legacy_field() {
    let payload = json!({
        "choices": [{
            "message": {
                "function_call": {
                    "name": "report",
                    "arguments": "```json\n{\"resource_name\": \"db-09\", \"eligibility_status\": \"eligible\"}\n```"
                }
            }
        }]
    });

    let outcome = Normalizer::default().run(&payload);
    assert_eq!(outcome.strategy, Some(Strategy::ToolCallWrapped));
    assert_eq!(outcome.analysis.resource_name(), "db-09");
    assert_eq!(outcome.analysis.verdict(), Verdict::Eligible);
    assert_eq!(outcome.analysis.justification(), NO_JUSTIFICATION);
}

#[test]
fn test_detailed_preset_keeps_more_items() {
    let recommendations: Vec<String> = (1..=6)
        .map(|n| format!("Node {}: reduce vCPU allocation by half", n))
        .collect();
    let payload = structured("eligible", recommendations, "");

    let default_record = normalize(&payload);
    let detailed_record = Normalizer::new(NormalizerConfig::detailed()).normalize(&payload);

    assert_eq!(default_record.recommendations(Category::Processing).unwrap().len(), 3);
    assert_eq!(detailed_record.recommendations(Category::Processing).unwrap().len(), 5);
}

#[test]
fn test_long_recommendation_is_truncated() {
    let long = format!("Increase memory {}", "a".repeat(200));
    let record = normalize(&structured("eligible", vec![long], ""));
    let item = &record.recommendations(Category::Memory).unwrap()[0];
    assert!(item.ends_with("..."));
    assert_eq!(item.chars().count(), 83);
}

#[test]
fn test_error_record_for_empty_input() {
    let record = normalize(&parse_raw(""));
    assert!(record.is_error_record());
    assert_eq!(record.justification(), PROCESSING_FAILED_JUSTIFICATION);
}

proptest! {
    /// Property: every text field stays within its bound
    #[test]
    fn test_truncation_bounds(
        recommendations in prop::collection::vec("\\PC{0,200}", 0..12),
        reasoning in "\\PC{0,600}",
    ) {
        let record = normalize(&structured("not eligible", recommendations, &reasoning));

        prop_assert!(record.justification().chars().count() <= 353);
        prop_assert!(record.reasons().len() <= 3);
        for reason in record.reasons() {
            prop_assert!(reason.chars().count() <= 123);
        }
        for items in record.recommendations_by_category().values() {
            prop_assert!(items.len() <= 3);
            for item in items {
                prop_assert!(item.chars().count() <= 83);
            }
        }
    }

    /// Property: categories present in the record are never empty
    #[test]
    fn test_no_empty_categories(text in "\\PC{0,400}") {
        let record = normalize(&json!(text));
        prop_assert!(record.recommendations_by_category().values().all(|items| !items.is_empty()));
    }

    /// Property: reasons only accompany a negative verdict
    #[test]
    fn test_reasons_only_when_negative(text in "\\PC{0,400}") {
        let record = normalize(&json!(text));
        if !record.reasons().is_empty() {
            prop_assert!(record.verdict().is_negative());
        }
    }

    /// Property: "eligible" in any casing is the only positive status
    #[test]
    fn test_eligible_status_any_case(flips in prop::collection::vec(any::<bool>(), 8)) {
        let status: String = "eligible"
            .chars()
            .zip(flips)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect();
        let record = normalize(&structured(&status, Vec::new(), ""));
        prop_assert_eq!(record.verdict(), Verdict::Eligible);
    }

    /// Property: any other status string is negative
    #[test]
    fn test_other_status_is_negative(status in "[a-zA-Z ]{0,20}") {
        prop_assume!(status.trim().to_lowercase() != "eligible");
        let record = normalize(&structured(&status, Vec::new(), ""));
        prop_assert_eq!(record.verdict(), Verdict::Ineligible);
    }

    /// Property: normalizing the same payload twice gives the same record
    #[test]
    fn test_idempotent(text in "\\PC{0,300}") {
        let payload = parse_raw(&text);
        prop_assert_eq!(normalize(&payload), normalize(&payload));
    }

    /// Property: the record always carries a justification
    #[test]
    fn test_justification_never_empty(text in "\\PC{0,300}") {
        let record = normalize(&json!(text));
        prop_assert!(!record.justification().is_empty());
    }
}
