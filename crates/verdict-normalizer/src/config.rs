//! Configuration for the Normalizer

use serde::{Deserialize, Serialize};

/// Limits and thresholds applied while normalizing a payload
///
/// Different backend generations produced different amounts of output, so
/// the caps are configurable. The presets mirror those generations.
///
/// # Examples
///
/// ```
/// use verdict_normalizer::NormalizerConfig;
///
/// let config = NormalizerConfig::default();
/// assert_eq!(config.max_items_per_category, 3);
///
/// let config = NormalizerConfig::compact();
/// assert_eq!(config.max_items_per_category, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Minimum length (characters) of a free-text recommendation line
    pub min_recommendation_line: usize,

    /// Minimum length (characters) of a reason/summary candidate line
    pub min_reason_line: usize,

    /// Maximum items kept per recommendation category
    pub max_items_per_category: usize,

    /// Maximum length of a recommendation item
    pub max_item_chars: usize,

    /// Maximum length of the justification
    pub max_justification_chars: usize,

    /// Maximum number of ineligibility reasons
    pub max_reasons: usize,

    /// Maximum length of a single reason
    pub max_reason_chars: usize,

    /// Maximum length of scalar text fields (resource name, cost impact, ...)
    pub max_field_chars: usize,

    /// Prefix length used for near-duplicate suppression
    pub dedup_prefix_chars: usize,

    /// Largest payload (characters of text) the normalizer will look at
    pub max_payload_chars: usize,
}

impl NormalizerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_reason_line < self.min_recommendation_line {
            return Err("min_reason_line cannot be shorter than min_recommendation_line".to_string());
        }
        if self.max_items_per_category == 0 {
            return Err("max_items_per_category must be greater than 0".to_string());
        }
        if self.max_item_chars == 0 {
            return Err("max_item_chars must be greater than 0".to_string());
        }
        if self.max_justification_chars == 0 {
            return Err("max_justification_chars must be greater than 0".to_string());
        }
        if self.max_reason_chars == 0 {
            return Err("max_reason_chars must be greater than 0".to_string());
        }
        if self.max_field_chars == 0 {
            return Err("max_field_chars must be greater than 0".to_string());
        }
        if self.dedup_prefix_chars == 0 {
            return Err("dedup_prefix_chars must be greater than 0".to_string());
        }
        if self.max_payload_chars == 0 {
            return Err("max_payload_chars must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            min_recommendation_line: 20,
            min_reason_line: 30,
            max_items_per_category: 3,
            max_item_chars: 80,
            max_justification_chars: 350,
            max_reasons: 3,
            max_reason_chars: 120,
            max_field_chars: 200,
            dedup_prefix_chars: 30,
            max_payload_chars: 100_000,
        }
    }
}

impl NormalizerConfig {
    /// Compact preset: two items per category, matching the dashboard cards
    pub fn compact() -> Self {
        Self {
            max_items_per_category: 2,
            max_reasons: 3,
            ..Self::default()
        }
    }

    /// Detailed preset: five items per category and four reasons
    pub fn detailed() -> Self {
        Self {
            min_reason_line: 50,
            max_items_per_category: 5,
            max_reasons: 4,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = NormalizerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(NormalizerConfig::compact().validate().is_ok());
        assert!(NormalizerConfig::detailed().validate().is_ok());
    }

    #[test]
    fn test_thresholds_stay_distinct() {
        let config = NormalizerConfig::default();
        assert!(config.min_reason_line > config.min_recommendation_line);
    }

    #[test]
    fn test_invalid_category_cap() {
        let mut config = NormalizerConfig::default();
        config.max_items_per_category = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reason_threshold_below_recommendation_threshold() {
        let mut config = NormalizerConfig::default();
        config.min_reason_line = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = NormalizerConfig::from_toml("max_items_per_category = 5\n").unwrap();
        assert_eq!(config.max_items_per_category, 5);
        assert_eq!(config.max_item_chars, 80);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = NormalizerConfig::detailed();
        let toml_str = config.to_toml().unwrap();
        let parsed = NormalizerConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
