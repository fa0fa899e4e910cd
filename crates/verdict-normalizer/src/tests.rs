//! Pipeline tests for the Normalizer

#[cfg(test)]
mod tests {
    use crate::{
        normalize, Category, Normalizer, NormalizerConfig, Strategy, Verdict,
        PROCESSING_FAILED_JUSTIFICATION,
    };
    use serde_json::{json, Value};

    fn tool_call_payload(arguments: &str, content: Value) -> Value {
        json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": "meta-llama/Llama-3.1-70B-Instruct",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content,
                    "tool_calls": [{
                        "id": "call_0",
                        "type": "function",
                        "function": {
                            "name": "report_resource_analysis",
                            "arguments": arguments
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        })
    }

    fn content_payload(content: &str) -> Value {
        json!({
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[test]
    fn test_structured_scenario() {
        let payload = json!({
            "resource_name": "db-01",
            "eligibility_status": "Eligible",
            "recommendations": [
                "Increase vCPU count from 2 to 4",
                "Add 8GB RAM",
                "unrelated note"
            ]
        });

        let record = normalize(&payload);

        assert_eq!(record.resource_name(), "db-01");
        assert_eq!(record.verdict(), Verdict::Eligible);
        assert_eq!(
            record.recommendations(Category::Processing).unwrap(),
            ["Increase vCPU count from 2 to 4"]
        );
        assert_eq!(record.recommendations(Category::Memory).unwrap(), ["Add 8GB RAM"]);
        assert_eq!(record.recommendations(Category::General).unwrap(), ["unrelated note"]);

        let keys: Vec<Category> = record.recommendations_by_category().keys().copied().collect();
        assert_eq!(keys, vec![Category::Processing, Category::Memory, Category::General]);
    }

    #[test]
    fn test_raw_string_scenario() {
        let payload = json!("Recurso não elegível. Dentro dos limites de utilização.");

        let record = normalize(&payload);

        assert_eq!(record.verdict(), Verdict::Ineligible);
        assert!(record
            .reasons()
            .iter()
            .any(|reason| reason.to_lowercase().contains("dentro dos limites")));
        assert!(!record.justification().is_empty());
    }

    #[test]
    fn test_tool_call_arguments_are_structured() {
        let arguments = json!({
            "resource_name": "vm-12",
            "guardrail_status": "Aprovado pelo guardrail",
            "tier_justification": "Carga de TIER 2 com folga de CPU.",
            "recommendations": ["Reduzir vCPU de 8 para 4"],
            "efficiency_score": 81.5,
            "cost_impact": "R$ 1.200/mês de economia",
            "application_tier": "TIER 2",
            "guardrails": "Mínimo de 4 vCPU para TIER 2"
        })
        .to_string();

        let outcome = Normalizer::default().run(&tool_call_payload(&arguments, Value::Null));
        let record = outcome.analysis;

        assert_eq!(outcome.strategy, Some(Strategy::ToolCallWrapped));
        assert_eq!(record.resource_name(), "vm-12");
        assert_eq!(record.verdict(), Verdict::Approved);
        assert_eq!(record.efficiency_score(), Some(81.5));
        assert_eq!(record.application_tier(), Some("TIER 2"));
        assert_eq!(record.guardrails_text(), Some("Mínimo de 4 vCPU para TIER 2"));
        assert_eq!(record.recommendations(Category::Processing).unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_tool_call_falls_back_to_content() {
        let content = "Resource: db-07\n\
                       The resource is not eligible for resizing.\n\
                       - Memory usage is already adequate for the workload\n\
                       - CPU utilization is within the limits of the tier";

        let wrapped = Normalizer::default()
            .run(&tool_call_payload("{\"resource_name\": \"db-07\", ", json!(content)));
        let free_text = normalize(&json!(content));

        assert_eq!(wrapped.strategy, Some(Strategy::LegacyFreeText));
        assert_eq!(wrapped.analysis, free_text);
        assert_eq!(free_text.verdict(), Verdict::Ineligible);
        assert_eq!(free_text.resource_name(), "db-07");
        assert_eq!(free_text.reasons().len(), 2);
    }

    #[test]
    fn test_tool_call_without_structured_fields_falls_back() {
        let content = "Recurso elegível.\nRecomendo reduzir vCPU de 8 para 4 núcleos.";

        for arguments in ["{}", "{\"notes\": \"n/a\"}", "{\"resource_name\": \"vm-3\"}"] {
            let outcome = Normalizer::default().run(&tool_call_payload(arguments, json!(content)));
            assert_eq!(outcome.strategy, Some(Strategy::LegacyFreeText));
            assert_eq!(outcome.analysis.verdict(), Verdict::Eligible);
            assert_eq!(
                outcome.analysis.recommendations(Category::Processing).unwrap(),
                ["Recomendo reduzir vCPU de 8 para 4 núcleos."]
            );
        }
    }

    #[test]
    fn test_malformed_tool_call_without_content_uses_stringified_payload() {
        let payload = tool_call_payload("not json at all", Value::Null);
        let outcome = Normalizer::default().run(&payload);
        assert_eq!(outcome.strategy, Some(Strategy::LegacyFreeText));
        assert!(!outcome.analysis.is_error_record());
    }

    #[test]
    fn test_tool_call_with_non_object_arguments_falls_back() {
        let payload = tool_call_payload("[\"eligible\"]", json!("Recurso elegível para redução de memória."));
        let outcome = Normalizer::default().run(&payload);
        assert_eq!(outcome.strategy, Some(Strategy::LegacyFreeText));
        assert_eq!(outcome.analysis.verdict(), Verdict::Eligible);
    }

    #[test]
    fn test_free_text_content_payload() {
        let content = "## Análise do recurso\n\
                       O recurso é elegível para redimensionamento.\n\
                       * Sugiro reduzir de 16 para 8 vCPUs\n\
                       * Sugiro reduzir a memória RAM de 128GB para 64GB\n\
                       * Recomendo migrar o disco para SSD gp3\n\
                       * Considerar aumentar a largura de banda da rede\n\n\
                       Portanto, o custo mensal cai pela metade sem risco.";

        let record = normalize(&content_payload(content));

        assert_eq!(record.verdict(), Verdict::Eligible);
        assert_eq!(
            record.justification(),
            "o custo mensal cai pela metade sem risco."
        );
        for category in [
            Category::Processing,
            Category::Memory,
            Category::Storage,
            Category::Network,
        ] {
            assert_eq!(record.recommendations(category).map(<[String]>::len), Some(1));
        }
        assert!(record.recommendations(Category::General).is_none());
        assert!(record.reasons().is_empty());
    }

    #[test]
    fn test_negation_precedence_in_free_text() {
        let record = normalize(&json!(
            "At first glance it looked eligible, but the resource is not eligible."
        ));
        assert_eq!(record.verdict(), Verdict::Ineligible);
    }

    #[test]
    fn test_unknown_payload_is_stringified() {
        let record = normalize(&json!({"status": "ok", "note": "eligible"}));
        assert_eq!(record.verdict(), Verdict::Eligible);
        assert_eq!(record.resource_name(), "");
    }

    #[test]
    fn test_error_record() {
        for payload in [Value::Null, json!(""), json!("   \n ")] {
            let outcome = Normalizer::default().run(&payload);
            assert!(outcome.strategy.is_none());
            assert_eq!(outcome.analysis.justification(), PROCESSING_FAILED_JUSTIFICATION);
            assert_eq!(outcome.analysis.verdict(), Verdict::Ineligible);
            assert!(outcome.analysis.recommendations_by_category().is_empty());
            assert!(outcome.analysis.reasons().is_empty());
        }
    }

    #[test]
    fn test_idempotent_structured() {
        let payload = json!({
            "resource_name": "db-01",
            "eligibility_status": "not eligible",
            "reasoning": "CPU is within the limits and memory is sufficient for peaks.",
            "recommendations": ["Keep current vCPU count"]
        });
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize(&payload), normalizer.normalize(&payload));
    }

    #[test]
    fn test_positive_verdict_has_no_reasons() {
        let payload = json!({
            "resource_name": "db-01",
            "eligibility_status": "eligible",
            "motivos": ["CPU dentro dos limites"]
        });
        assert!(normalize(&payload).reasons().is_empty());
    }

    #[test]
    fn test_compact_preset_caps_categories() {
        let payload = json!({
            "resource_name": "db-01",
            "eligibility_status": "eligible",
            "recommendations": [
                "Reduce vCPU on primary",
                "Reduce vCPU on replica one",
                "Reduce CPU shares on replica two"
            ]
        });
        let record = Normalizer::new(NormalizerConfig::compact()).normalize(&payload);
        assert_eq!(record.recommendations(Category::Processing).unwrap().len(), 2);
    }

    #[test]
    fn test_serialized_record_shape() {
        let payload = json!({
            "resource_name": "db-01",
            "eligibility_status": "eligible",
            "recommendations": ["Add 8GB RAM"]
        });
        let json = serde_json::to_value(normalize(&payload)).unwrap();
        assert_eq!(json["verdict"], "Eligible");
        assert_eq!(json["recommendationsByCategory"]["Memory"][0], "Add 8GB RAM");
        assert!(json.get("efficiencyScore").is_none());
    }
}
