//! Sorting recommendations into categories

use crate::config::NormalizerConfig;
use crate::rules::match_category;
use crate::segmenter::{prefix_key, truncate_chars};
use crate::types::Category;
use std::collections::BTreeMap;
use tracing::debug;

/// Groups recommendation items by category
pub struct RecommendationCategorizer {
    max_items: usize,
    max_item_chars: usize,
    dedup_prefix_chars: usize,
}

impl RecommendationCategorizer {
    /// Create a new categorizer
    pub fn new(max_items: usize, max_item_chars: usize, dedup_prefix_chars: usize) -> Self {
        Self {
            max_items,
            max_item_chars,
            dedup_prefix_chars,
        }
    }

    /// Create a categorizer with the limits from a config
    pub fn from_config(config: &NormalizerConfig) -> Self {
        Self::new(
            config.max_items_per_category,
            config.max_item_chars,
            config.dedup_prefix_chars,
        )
    }

    /// Categorize items, first matching rule wins
    ///
    /// Near-duplicates are dropped per category, then each list is capped and
    /// every item truncated. Only categories that received an item appear in
    /// the result.
    pub fn categorize<I, S>(&self, items: I) -> BTreeMap<Category, Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buckets: BTreeMap<Category, Vec<String>> = BTreeMap::new();

        for item in items {
            let item = item.as_ref().trim();
            if item.is_empty() {
                continue;
            }

            let category = match_category(item);
            let bucket = buckets.entry(category).or_default();
            if is_near_duplicate(bucket, item, self.dedup_prefix_chars) {
                debug!("Dropping near-duplicate {} recommendation", category);
                continue;
            }
            bucket.push(item.to_string());
        }

        buckets
            .into_iter()
            .map(|(category, items)| {
                let items = items
                    .into_iter()
                    .take(self.max_items)
                    .map(|item| truncate_chars(&item, self.max_item_chars))
                    .collect::<Vec<_>>();
                (category, items)
            })
            .filter(|(_, items)| !items.is_empty())
            .collect()
    }
}

/// True if an accepted item already contains the first `prefix_chars`
/// characters of `item` (case-insensitive)
pub(crate) fn is_near_duplicate(accepted: &[String], item: &str, prefix_chars: usize) -> bool {
    let key = prefix_key(item, prefix_chars);
    accepted
        .iter()
        .any(|existing| existing.to_lowercase().contains(&key))
}
