//! Text segmentation for free-text analysis output

use crate::config::NormalizerConfig;

/// Marker appended to truncated text
pub const ELLIPSIS: &str = "...";

/// Splits model output into candidate lines
///
/// Two length thresholds are kept apart on purpose: recommendation lines are
/// often short imperatives, while reason and summary lines need a full clause
/// to be worth showing.
pub struct TextSegmenter {
    min_recommendation_line: usize,
    min_reason_line: usize,
}

impl TextSegmenter {
    /// Create a new segmenter
    pub fn new(min_recommendation_line: usize, min_reason_line: usize) -> Self {
        Self {
            min_recommendation_line,
            min_reason_line,
        }
    }

    /// Create a segmenter with the thresholds from a config
    pub fn from_config(config: &NormalizerConfig) -> Self {
        Self::new(config.min_recommendation_line, config.min_reason_line)
    }

    /// Lines long enough to be a recommendation
    pub fn recommendation_lines(&self, text: &str) -> Vec<String> {
        self.lines_at_least(text, self.min_recommendation_line)
    }

    /// Lines long enough to be a reason or summary candidate
    pub fn reason_lines(&self, text: &str) -> Vec<String> {
        self.lines_at_least(text, self.min_reason_line)
    }

    /// Minimum length of a reason/summary line
    pub fn min_reason_line(&self) -> usize {
        self.min_reason_line
    }

    fn lines_at_least(&self, text: &str, min_chars: usize) -> Vec<String> {
        text.lines()
            .map(clean_line)
            .filter(|line| line.chars().count() >= min_chars)
            .collect()
    }
}

/// Trim a line and strip leading bullet and markup characters
pub fn clean_line(line: &str) -> String {
    let stripped = line
        .trim()
        .trim_start_matches(|c: char| {
            matches!(c, '*' | '+' | '-' | '•' | '►' | '#' | '>') || c.is_whitespace()
        });
    strip_numbering(stripped).replace("**", "").trim().to_string()
}

/// Strip a leading `1.` / `2)` list marker
fn strip_numbering(line: &str) -> &str {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return line;
    }
    let rest = &line[digits..];
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some('.') | Some(')'), Some(c)) if c.is_whitespace() => rest[1..].trim_start(),
        _ => line,
    }
}

/// Split text into sentences, keeping the terminator
///
/// A `.`, `!` or `?` only ends a sentence when followed by whitespace or the
/// end of text, so figures like `2.5` stay intact.
pub fn sentences(text: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();

    while let Some((idx, c)) = iter.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let at_boundary = iter.peek().map_or(true, |(_, next)| next.is_whitespace());
        if at_boundary {
            let end = idx + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                result.push(sentence.to_string());
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        result.push(tail.to_string());
    }

    result
}

/// Truncate to `max_chars` characters, appending [`ELLIPSIS`] when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push_str(ELLIPSIS);
    truncated
}

/// First `n` characters, lowercased; the near-duplicate key
pub fn prefix_key(text: &str, n: usize) -> String {
    text.chars().take(n).collect::<String>().to_lowercase()
}
