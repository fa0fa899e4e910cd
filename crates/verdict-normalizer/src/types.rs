//! Canonical record types produced by the normalizer

use crate::config::NormalizerConfig;
use crate::segmenter::truncate_chars;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Justification used by the canonical error record
pub const PROCESSING_FAILED_JUSTIFICATION: &str =
    "Could not process the analysis for this resource.";

/// Justification used when a payload carries no explanation at all
pub const NO_JUSTIFICATION: &str = "No justification was provided for this verdict.";

/// Which question a verdict answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerdictAxis {
    /// Cost-optimization eligibility (can the resource be resized?)
    Eligibility,
    /// Guardrail compliance (does the proposal respect the guardrails?)
    Guardrail,
}

/// Canonical verdict of an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Resource may be resized
    Eligible,
    /// Resource should not be resized
    Ineligible,
    /// Proposal approved by the guardrails
    Approved,
    /// Proposal rejected by the guardrails
    Rejected,
    /// Payload did not carry a usable verdict
    Unknown,
}

impl Verdict {
    /// Build a verdict on the given axis from a boolean outcome
    pub fn on_axis(axis: VerdictAxis, positive: bool) -> Self {
        match (axis, positive) {
            (VerdictAxis::Eligibility, true) => Verdict::Eligible,
            (VerdictAxis::Eligibility, false) => Verdict::Ineligible,
            (VerdictAxis::Guardrail, true) => Verdict::Approved,
            (VerdictAxis::Guardrail, false) => Verdict::Rejected,
        }
    }

    /// Axis the verdict was decided on, `None` for [`Verdict::Unknown`]
    pub fn axis(&self) -> Option<VerdictAxis> {
        match self {
            Verdict::Eligible | Verdict::Ineligible => Some(VerdictAxis::Eligibility),
            Verdict::Approved | Verdict::Rejected => Some(VerdictAxis::Guardrail),
            Verdict::Unknown => None,
        }
    }

    /// Collapse to the boolean axis, `None` for [`Verdict::Unknown`]
    pub fn is_positive(&self) -> Option<bool> {
        match self {
            Verdict::Eligible | Verdict::Approved => Some(true),
            Verdict::Ineligible | Verdict::Rejected => Some(false),
            Verdict::Unknown => None,
        }
    }

    /// True for [`Verdict::Ineligible`] and [`Verdict::Rejected`]
    pub fn is_negative(&self) -> bool {
        self.is_positive() == Some(false)
    }

    /// Display label; the two axes read differently
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Eligible => "Eligible",
            Verdict::Ineligible => "Not eligible",
            Verdict::Approved => "Approved by guardrails",
            Verdict::Rejected => "Rejected by guardrails",
            Verdict::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Recommendation bucket
///
/// Declaration order is the rule priority order; the derived `Ord` keeps
/// [`NormalizedAnalysis::recommendations_by_category`] in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// CPU / compute sizing
    Processing,
    /// RAM sizing
    Memory,
    /// Disks, volumes, IOPS
    Storage,
    /// Bandwidth, latency, traffic
    Network,
    /// Anything not matched by the rules above
    General,
}

impl Category {
    /// All categories in priority order
    pub const ALL: [Category; 5] = [
        Category::Processing,
        Category::Memory,
        Category::Storage,
        Category::Network,
        Category::General,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Processing => "Processing",
            Category::Memory => "Memory",
            Category::Storage => "Storage",
            Category::Network => "Network",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display-ready record built from one analysis payload
///
/// Fields are read-only once built. Construct through
/// [`crate::Normalizer::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedAnalysis {
    resource_name: String,
    verdict: Verdict,
    justification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    efficiency_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost_impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    application_tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    guardrails_text: Option<String>,
    reasons: Vec<String>,
    recommendations_by_category: BTreeMap<Category, Vec<String>>,
}

impl NormalizedAnalysis {
    /// The canonical error record
    pub fn error_record() -> Self {
        Self {
            resource_name: String::new(),
            verdict: Verdict::Ineligible,
            justification: PROCESSING_FAILED_JUSTIFICATION.to_string(),
            efficiency_score: None,
            cost_impact: None,
            application_tier: None,
            guardrails_text: None,
            reasons: Vec::new(),
            recommendations_by_category: BTreeMap::new(),
        }
    }

    /// Resource name, empty when unknown
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// Verdict
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Justification, never empty
    pub fn justification(&self) -> &str {
        &self.justification
    }

    /// Efficiency score in `0.0..=100.0`
    pub fn efficiency_score(&self) -> Option<f64> {
        self.efficiency_score
    }

    /// Cost impact text
    pub fn cost_impact(&self) -> Option<&str> {
        self.cost_impact.as_deref()
    }

    /// Application tier
    pub fn application_tier(&self) -> Option<&str> {
        self.application_tier.as_deref()
    }

    /// Guardrails text
    pub fn guardrails_text(&self) -> Option<&str> {
        self.guardrails_text.as_deref()
    }

    /// Reasons for a negative verdict
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Recommendations grouped by category, in rule order, never empty lists
    pub fn recommendations_by_category(&self) -> &BTreeMap<Category, Vec<String>> {
        &self.recommendations_by_category
    }

    /// Recommendations for a single category
    pub fn recommendations(&self, category: Category) -> Option<&[String]> {
        self.recommendations_by_category
            .get(&category)
            .map(Vec::as_slice)
    }

    /// True if this is the canonical error record
    pub fn is_error_record(&self) -> bool {
        *self == Self::error_record()
    }
}

/// Accumulates the parts of a [`NormalizedAnalysis`] and freezes them
#[derive(Debug, Default)]
pub(crate) struct AnalysisBuilder {
    resource_name: Option<String>,
    verdict: Option<Verdict>,
    justification: Option<String>,
    efficiency_score: Option<f64>,
    cost_impact: Option<String>,
    application_tier: Option<String>,
    guardrails_text: Option<String>,
    reasons: Vec<String>,
    recommendations: BTreeMap<Category, Vec<String>>,
}

impl AnalysisBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resource_name(mut self, name: Option<String>) -> Self {
        self.resource_name = name;
        self
    }

    /// Use `name` only if no resource name was found in the payload
    pub fn fallback_resource_name(mut self, name: Option<&str>) -> Self {
        let missing = self
            .resource_name
            .as_deref()
            .map_or(true, |current| current.trim().is_empty());
        if missing {
            if let Some(name) = name {
                self.resource_name = Some(name.to_string());
            }
        }
        self
    }

    pub fn verdict(mut self, verdict: Verdict) -> Self {
        self.verdict = Some(verdict);
        self
    }

    pub fn justification(mut self, justification: String) -> Self {
        self.justification = Some(justification);
        self
    }

    pub fn efficiency_score(mut self, score: Option<f64>) -> Self {
        self.efficiency_score = score;
        self
    }

    pub fn cost_impact(mut self, cost_impact: Option<String>) -> Self {
        self.cost_impact = cost_impact;
        self
    }

    pub fn application_tier(mut self, tier: Option<String>) -> Self {
        self.application_tier = tier;
        self
    }

    pub fn guardrails_text(mut self, guardrails: Option<String>) -> Self {
        self.guardrails_text = guardrails;
        self
    }

    pub fn reasons(mut self, reasons: Vec<String>) -> Self {
        self.reasons = reasons;
        self
    }

    pub fn recommendations(mut self, recommendations: BTreeMap<Category, Vec<String>>) -> Self {
        self.recommendations = recommendations;
        self
    }

    /// Freeze into a record, applying defaults and field limits
    pub fn build(self, config: &NormalizerConfig) -> NormalizedAnalysis {
        let field = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| truncate_chars(&v, config.max_field_chars))
        };

        let verdict = self.verdict.unwrap_or(Verdict::Unknown);

        let justification = self
            .justification
            .map(|j| j.trim().to_string())
            .filter(|j| !j.is_empty())
            .map(|j| truncate_chars(&j, config.max_justification_chars))
            .unwrap_or_else(|| NO_JUSTIFICATION.to_string());

        let reasons = if verdict.is_negative() {
            self.reasons
                .into_iter()
                .filter(|r| !r.trim().is_empty())
                .map(|r| truncate_chars(&r, config.max_reason_chars))
                .collect()
        } else {
            Vec::new()
        };

        let recommendations = self
            .recommendations
            .into_iter()
            .filter(|(_, items)| !items.is_empty())
            .collect();

        NormalizedAnalysis {
            resource_name: field(self.resource_name).unwrap_or_default(),
            verdict,
            justification,
            efficiency_score: self
                .efficiency_score
                .filter(|s| s.is_finite())
                .map(|s| s.clamp(0.0, 100.0)),
            cost_impact: field(self.cost_impact),
            application_tier: field(self.application_tier),
            guardrails_text: field(self.guardrails_text),
            reasons,
            recommendations_by_category: recommendations,
        }
    }
}
