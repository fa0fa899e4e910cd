//! Core Normalizer implementation

use crate::config::NormalizerConfig;
use crate::error::NormalizerError;
use crate::payload::{unwrap_envelope, PayloadShape};
use crate::strategy::{Strategy, Toolkit};
use crate::types::NormalizedAnalysis;
use serde_json::Value;
use tracing::{debug, warn};

/// Result of one normalization, with the strategy that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    /// The canonical record
    pub analysis: NormalizedAnalysis,

    /// Winning strategy; `None` when the error record was substituted
    pub strategy: Option<Strategy>,
}

/// The Normalizer turns analysis payloads of any shape into canonical records
///
/// It holds no mutable state, so one instance can serve concurrent callers.
pub struct Normalizer {
    config: NormalizerConfig,
    toolkit: Toolkit,
}

impl Normalizer {
    /// Create a new Normalizer
    pub fn new(config: NormalizerConfig) -> Self {
        let toolkit = Toolkit::from_config(&config);
        Self { config, toolkit }
    }

    /// The active configuration
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize a payload; never fails
    ///
    /// Any failure yields [`NormalizedAnalysis::error_record`].
    pub fn normalize(&self, raw: &Value) -> NormalizedAnalysis {
        self.run(raw).analysis
    }

    /// Normalize a payload and report which strategy won
    pub fn run(&self, raw: &Value) -> Normalization {
        match self.try_normalize(raw) {
            Ok((analysis, strategy)) => Normalization {
                analysis,
                strategy: Some(strategy),
            },
            Err(e) => {
                warn!("Could not normalize analysis payload: {}", e);
                Normalization {
                    analysis: NormalizedAnalysis::error_record(),
                    strategy: None,
                }
            }
        }
    }

    /// Run the strategy chain, surfacing the last failure
    ///
    /// Strategies are tried in [`Strategy::CHAIN`] order and the first
    /// success wins.
    pub fn try_normalize(
        &self,
        raw: &Value,
    ) -> Result<(NormalizedAnalysis, Strategy), NormalizerError> {
        self.config.validate().map_err(NormalizerError::Config)?;

        let (payload, envelope_resource) = unwrap_envelope(raw);
        let shape = PayloadShape::classify(payload);
        debug!("Classified payload as {}", shape.kind());

        let mut last_error = NormalizerError::EmptyPayload;
        for strategy in Strategy::CHAIN {
            match strategy.attempt(payload, &shape, &self.toolkit) {
                Ok(builder) => {
                    debug!("Strategy {} produced the record", strategy);
                    let analysis = builder
                        .fallback_resource_name(envelope_resource)
                        .build(&self.config);
                    return Ok((analysis, strategy));
                }
                Err(e) => {
                    debug!("Strategy {} skipped: {}", strategy, e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

/// Normalize a payload with the default configuration
pub fn normalize(raw: &Value) -> NormalizedAnalysis {
    Normalizer::default().normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Verdict;
    use serde_json::json;

    #[test]
    fn test_structured_strategy_wins() {
        let payload = json!({"resource_name": "db-01", "eligibility_status": "eligible"});
        let outcome = Normalizer::default().run(&payload);
        assert_eq!(outcome.strategy, Some(Strategy::DirectStructured));
        assert_eq!(outcome.analysis.verdict(), Verdict::Eligible);
    }

    #[test]
    fn test_null_payload_yields_error_record() {
        let outcome = Normalizer::default().run(&Value::Null);
        assert_eq!(outcome.strategy, None);
        assert!(outcome.analysis.is_error_record());
    }

    #[test]
    fn test_invalid_config_yields_error_record() {
        let mut config = NormalizerConfig::default();
        config.max_item_chars = 0;
        let normalizer = Normalizer::new(config);

        let payload = json!({"resource_name": "db-01", "eligibility_status": "eligible"});
        assert!(matches!(
            normalizer.try_normalize(&payload),
            Err(NormalizerError::Config(_))
        ));
        assert!(normalizer.normalize(&payload).is_error_record());
    }

    #[test]
    fn test_oversized_payload_yields_error_record() {
        let mut config = NormalizerConfig::default();
        config.max_payload_chars = 16;
        let normalizer = Normalizer::new(config);

        let record = normalizer.normalize(&json!("The resource is eligible for a smaller size."));
        assert!(record.is_error_record());
    }

    #[test]
    fn test_envelope_resource_fills_missing_name() {
        let payload = json!({
            "resource_id": "vm-7",
            "analysis": {"choices": [{"message": {"content": "The resource is eligible."}}]}
        });
        let record = normalize(&payload);
        assert_eq!(record.resource_name(), "vm-7");
        assert_eq!(record.verdict(), Verdict::Eligible);
    }

    #[test]
    fn test_normalizer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Normalizer>();
    }
}
