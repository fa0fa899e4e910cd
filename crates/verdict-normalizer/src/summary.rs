//! Justification and ineligibility-reason extraction

use crate::categorizer::is_near_duplicate;
use crate::config::NormalizerConfig;
use crate::rules::{adequacy_marker_re, summary_label_res};
use crate::segmenter::{clean_line, sentences, truncate_chars, TextSegmenter};

/// Pulls a justification and reasons out of analysis text
pub struct SummaryExtractor {
    segmenter: TextSegmenter,
    max_justification_chars: usize,
    max_reasons: usize,
    max_reason_chars: usize,
    dedup_prefix_chars: usize,
}

impl SummaryExtractor {
    /// Create an extractor with the limits from a config
    pub fn from_config(config: &NormalizerConfig) -> Self {
        Self {
            segmenter: TextSegmenter::from_config(config),
            max_justification_chars: config.max_justification_chars,
            max_reasons: config.max_reasons,
            max_reason_chars: config.max_reason_chars,
            dedup_prefix_chars: config.dedup_prefix_chars,
        }
    }

    /// Justification from a structured field value
    pub fn justification_from_field(&self, value: &str) -> String {
        truncate_chars(&collapse_whitespace(value), self.max_justification_chars)
    }

    /// Justification from free text
    ///
    /// Tries the labelled patterns first ("final answer:", "conclusão:",
    /// "therefore", ...), then the last two long sentences, then the whole
    /// text. Empty only if the text is.
    pub fn justification_from_text(&self, text: &str) -> String {
        let labelled = summary_label_res().iter().find_map(|re| {
            re.captures(text)
                .map(|caps| collapse_whitespace(&caps[1]))
                .filter(|s| !s.is_empty())
        });

        let justification = labelled
            .or_else(|| self.last_long_sentences(text))
            .unwrap_or_else(|| collapse_whitespace(text));

        truncate_chars(&justification, self.max_justification_chars)
    }

    /// Reasons scanned from free text
    ///
    /// Keeps reason-length lines that say the resource is already adequate,
    /// within limits, sufficient or well sized.
    pub fn reasons_from_text(&self, text: &str) -> Vec<String> {
        let marker = adequacy_marker_re();
        let candidates = self
            .segmenter
            .reason_lines(text)
            .into_iter()
            .filter(|line| marker.is_match(line));
        self.bounded(candidates)
    }

    /// Reasons from an explicit list (e.g. a `motivos` array)
    pub fn reasons_from_items<I, S>(&self, items: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.bounded(items.into_iter().map(|item| clean_line(item.as_ref())))
    }

    fn bounded<I: Iterator<Item = String>>(&self, candidates: I) -> Vec<String> {
        let mut reasons: Vec<String> = Vec::new();
        for candidate in candidates {
            if reasons.len() >= self.max_reasons {
                break;
            }
            if candidate.is_empty()
                || is_near_duplicate(&reasons, &candidate, self.dedup_prefix_chars)
            {
                continue;
            }
            reasons.push(candidate);
        }
        reasons
            .into_iter()
            .map(|reason| truncate_chars(&reason, self.max_reason_chars))
            .collect()
    }

    fn last_long_sentences(&self, text: &str) -> Option<String> {
        let min = self.segmenter.min_reason_line();
        let long: Vec<String> = text
            .lines()
            .map(clean_line)
            .flat_map(|line| sentences(&line))
            .filter(|sentence| sentence.chars().count() >= min)
            .collect();

        if long.is_empty() {
            return None;
        }
        let start = long.len().saturating_sub(2);
        Some(long[start..].join(" "))
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.replace("**", "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
