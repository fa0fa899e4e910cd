//! Static heuristics: category rules and bilingual marker sets
//!
//! Everything here is data plus lazily compiled patterns. The classifier,
//! categorizer and summary modules only consume these tables, so wording can
//! be revised here without touching the extraction logic.

use crate::types::Category;
use regex::Regex;
use std::sync::OnceLock;

/// A category and the pattern that routes an item into it
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    /// Target category
    pub category: Category,
    /// Case-insensitive pattern; `None` marks the catch-all
    pub pattern: Option<&'static str>,
}

/// Category rules in priority order; the last entry is the catch-all
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Processing,
        pattern: Some(
            r"(?i)\b(v?cpus?|cores?|n[uú]cleos?|processador\w*|processor\w*|processing|processamento|compute|clock)\b",
        ),
    },
    CategoryRule {
        category: Category::Memory,
        pattern: Some(r"(?i)\b(ram|mem[oó]ria|memory|swap|heap|\d+\s*gi?b\s+de\s+ram)\b"),
    },
    CategoryRule {
        category: Category::Storage,
        pattern: Some(
            r"(?i)\b(dis[ck]o?s?|storage|armazenamento|iops|ssd|hdd|volumes?|ebs|nvme)\b",
        ),
    },
    CategoryRule {
        category: Category::Network,
        pattern: Some(
            r"(?i)\b(network|rede|bandwidth|largura de banda|lat[eê]ncia|latency|throughput|egress|ingress|tr[aá]fego|traffic)\b",
        ),
    },
    CategoryRule {
        category: Category::General,
        pattern: None,
    },
];

/// Positive eligibility markers (lowercase)
pub const ELIGIBILITY_POSITIVE: &[&str] = &["eligible", "elegível", "elegivel"];

/// Substrings that tie free text to the eligibility axis
pub const ELIGIBILITY_TERMS: &[&str] = &["eligib", "elegív", "elegiv"];

/// Positive guardrail-compliance markers (lowercase)
pub const GUARDRAIL_POSITIVE: &[&str] = &[
    "aprovado pelo guardrail",
    "aprovado pelos guardrails",
    "approved by the guardrail",
    "approved by guardrail",
    "atende aos guardrails",
    "atende os guardrails",
    "complies with the guardrails",
];

/// Substrings that tie free text to the guardrail axis
pub const GUARDRAIL_TERMS: &[&str] = &["guardrail"];

/// Accepted (case-insensitive) values of a structured `eligibility_status`
pub const ELIGIBLE_STATUS_TOKENS: &[&str] = &["eligible"];

/// Accepted (case-insensitive) values of a structured `guardrail_status`
pub const APPROVED_STATUS_TOKENS: &[&str] = &["aprovado pelo guardrail", "aprovado", "approved"];

/// True if `text` (already lowercased) contains any marker
pub fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| text.contains(m))
}

fn compiled_category_rules() -> &'static [(Category, Option<Regex>)] {
    static RULES: OnceLock<Vec<(Category, Option<Regex>)>> = OnceLock::new();
    RULES.get_or_init(|| {
        CATEGORY_RULES
            .iter()
            .map(|rule| {
                let regex = rule
                    .pattern
                    .map(|p| Regex::new(p).expect("category rule regex must compile"));
                (rule.category, regex)
            })
            .collect()
    })
}

/// First category whose rule matches; the catch-all absorbs the rest
pub fn match_category(item: &str) -> Category {
    compiled_category_rules()
        .iter()
        .find(|(_, regex)| regex.as_ref().map_or(true, |r| r.is_match(item)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}

/// Lines that read like an action to take
pub fn recommendation_cue_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(recomend\w*|recommend\w*|suger\w*|suggest\w*|aument\w*|increas\w*|reduz\w*|reduc\w*|diminu\w*|decreas\w*|redimension\w*|resiz\w*|ajust\w*|adjust\w*|migr\w*|upgrad\w*|downgrad\w*|alter\w*|chang\w*|add|adicion\w*|consider\w*|enable|habilit\w*)\b",
        )
        .expect("recommendation cue regex must compile")
    })
}

/// Negated eligibility: "not eligible", "isn't currently eligible",
/// "não é elegível", "inelegível", "inapto"
pub fn eligibility_negation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:not|isn['’]?t|aren['’]?t|never|no\s+longer|n[aã]o|nem)\s+(?:\w+\s+){0,2}?(?:eligible|eleg[ií]vel|apto)\b|\bin(?:eligible|eleg[ií]vel|apto)\b",
        )
        .expect("eligibility negation regex must compile")
    })
}

/// Negated guardrail compliance: "não aprovado", "rejected", "does not comply"
///
/// Violations are matched separately by [`violation_re`] because "não viola"
/// is compliance, not a breach.
pub fn guardrail_negation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:not|n[aã]o|never)\s+(?:\w+\s+){0,2}?(?:aprovad[oa]s?|approved)\b|\b(?:reprovad|rejeitad)[oa]s?\b|\brejected\b|\b(?:n[aã]o|does\s+not|doesn['’]?t|do\s+not|don['’]?t)\s+(?:\w+\s+)?(?:atende\w*|compl(?:y|ies))\b",
        )
        .expect("guardrail negation regex must compile")
    })
}

/// Violation mentions; group 1 holds a preceding negation, if any
pub fn violation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(n[aã]o\s+|does\s+not\s+|doesn['’]?t\s+|never\s+)?(?:viola\w*|violat\w*)",
        )
        .expect("violation regex must compile")
    })
}

/// Lines that state a sizing change: `16 -> 8`, `de 64GB para 32GB`
pub fn sizing_change_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\d\s*\w*\s*(?:->|→|=>)\s*\d|\b(?:de|from)\s+\d+(?:[.,]\d+)?\s*\w*\s+(?:para|to)\s+\d",
        )
        .expect("sizing change regex must compile")
    })
}

/// "Already adequate / within limits / sufficient / well-sized" markers
pub fn adequacy_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(j[aá]\s+(est[aá]\s+)?(adequad|otimizad|bem dimensionad)|\badequad[oa]s?\b|dentro d[oa]s?\s+(limites?|par[aâ]metros)|within\s+(the\s+)?(limits?|thresholds?|guardrails?)|\bsuficientes?\b|\bsufficient\b|well[- ]sized|bem dimensionad|right[- ]?sized|already\s+(optimi[sz]ed|adequate)|n[aã]o\s+(h[aá]|existe)\s+necessidade|no\s+need\s+to)",
        )
        .expect("adequacy marker regex must compile")
    })
}

/// Label-prefixed summary patterns, tried in order
///
/// Each captures text after the label up to a blank line, a new bullet or
/// heading, or the end of text.
pub fn summary_label_res() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        const END: &str = r"(?:\n\s*\n|\n\s*[#*\-•►]|\z)";
        [
            r"\b(?:final answer|resposta final)[*_\s]*:[*_\s]*",
            r"\b(?:conclusion|conclus[aã]o)[*_\s]*:[*_\s]*",
            r"\b(?:justification|justificativa)[*_\s]*:[*_\s]*",
            r"\b(?:therefore|portanto|in conclusion|in summary|em resumo|em suma)[*_\s]*,?[*_\s]*",
        ]
        .iter()
        .map(|label| {
            Regex::new(&format!(r"(?is){}(.+?){}", label, END))
                .expect("summary label regex must compile")
        })
        .collect()
    })
}

/// `Resource: name` style label at the start of a line
pub fn resource_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?im)^[\W_]*(?:resource(?:[ _](?:name|id))?|nome do recurso|recurso)[*_\s]*[:=][*_\s`"']*([A-Za-z0-9][\w.\-:/]*)"#,
        )
        .expect("resource label regex must compile")
    })
}

/// `TIER 0`..`TIER 4` mention
pub fn tier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\btier\s*[:#-]?\s*([0-4])\b").expect("tier regex must compile")
    })
}

/// Efficiency score mention
///
/// An explicit "efficiency score" label captures into group 1. A bare
/// "eficiência" only counts when the number reads as a score (`72%`,
/// `72/100`) and captures into group 2.
pub fn efficiency_score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(?:efficiency score|score de efici[eê]ncia)\D{0,20}?(\d{1,3}(?:[.,]\d+)?)|efici[eê]ncia\D{0,20}?(\d{1,3}(?:[.,]\d+)?)\s*(?:%|/\s*100\b)",
        )
        .expect("efficiency score regex must compile")
    })
}
