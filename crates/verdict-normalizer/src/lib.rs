//! Verdict Normalizer
//!
//! Turns AI-generated resource optimization analyses into one canonical,
//! display-ready record, whatever shape the backend answered with.
//!
//! # Overview
//!
//! The analysis backend has answered in three shapes over time: direct
//! structured JSON, a chat completion whose tool call carries the same JSON
//! as a string, and plain model prose. The [`Normalizer`] classifies the
//! payload once, then tries its extraction strategies in order and returns
//! the first result. It never fails: when nothing usable can be extracted the
//! caller receives [`NormalizedAnalysis::error_record`].
//!
//! # Architecture
//!
//! ```text
//! Payload → PayloadShape → Strategy chain ─┬─ direct-structured
//!                                          ├─ tool-call
//!                                          └─ free-text
//!                                   ↓
//!        Classifier · Categorizer · Summary → AnalysisBuilder → NormalizedAnalysis
//! ```
//!
//! # Example Usage
//!
//! ```
//! use serde_json::json;
//! use verdict_normalizer::{Category, Normalizer, NormalizerConfig, Verdict};
//!
//! let normalizer = Normalizer::new(NormalizerConfig::default());
//!
//! let payload = json!({
//!     "resource_name": "db-01",
//!     "eligibility_status": "Eligible",
//!     "recommendations": ["Increase vCPU count from 2 to 4", "Add 8GB RAM"]
//! });
//!
//! let analysis = normalizer.normalize(&payload);
//!
//! assert_eq!(analysis.verdict(), Verdict::Eligible);
//! assert_eq!(
//!     analysis.recommendations(Category::Memory),
//!     Some(&["Add 8GB RAM".to_string()][..])
//! );
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod rules;
mod segmenter;
mod classifier;
mod categorizer;
mod summary;
mod payload;
mod strategy;
mod normalizer;

#[cfg(test)]
mod tests;

pub use error::NormalizerError;
pub use config::NormalizerConfig;
pub use types::{
    Category, NormalizedAnalysis, Verdict, VerdictAxis, NO_JUSTIFICATION,
    PROCESSING_FAILED_JUSTIFICATION,
};
pub use rules::{CategoryRule, CATEGORY_RULES};
pub use segmenter::{TextSegmenter, ELLIPSIS};
pub use classifier::{classify_status, classify_text};
pub use categorizer::RecommendationCategorizer;
pub use summary::SummaryExtractor;
pub use payload::{parse_raw, PayloadShape};
pub use strategy::Strategy;
pub use normalizer::{normalize, Normalization, Normalizer};
