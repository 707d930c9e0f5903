//! Naive retrieval over the knowledge catalogue.
//!
//! A linear scan with case-insensitive substring matching against topic and
//! content. No tokenization, no ranking, no result limit — the corpus is
//! small enough that anything cleverer would be overhead. Results keep store
//! order so retrieval is deterministic.
//!
//! The empty query matches every entry (the empty string is a substring of
//! anything). Downstream behaviour relies on this, so it is contract, not
//! accident.

use super::StoredEntry;

/// Return every entry whose topic or content contains `query`,
/// case-insensitively, in store order.
pub fn search<'a>(entries: &'a [StoredEntry], query: &str) -> Vec<&'a StoredEntry> {
    let needle = query.to_lowercase();
    entries.iter().filter(|e| matches(e, &needle)).collect()
}

/// `needle` must already be lowercased.
fn matches(entry: &StoredEntry, needle: &str) -> bool {
    entry.topic.to_lowercase().contains(needle) || entry.content.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{Category, seed};

    fn entry(topic: &str, content: &str) -> StoredEntry {
        StoredEntry {
            topic: topic.into(),
            content: content.into(),
            category: Category::General,
            created_by: "system".into(),
            created_at: "2025-11-01T08:00:00Z".into(),
        }
    }

    #[test]
    fn matches_substring_of_topic() {
        let entries = [entry("iPhone 15 Pro Max Details", "nothing relevant")];
        let hits = search(&entries, "iphone 15");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn matches_substring_of_content() {
        let entries = [entry("Unrelated", "Payment: M-Pesa, Credit/Debit Cards")];
        assert_eq!(search(&entries, "m-pesa").len(), 1);
    }

    #[test]
    fn match_is_case_insensitive_both_ways() {
        let entries = [entry("Gaming Consoles", "PlayStation 5")];
        assert_eq!(search(&entries, "PLAYSTATION").len(), 1);
        assert_eq!(search(&entries, "gaming").len(), 1);
    }

    #[test]
    fn non_substring_does_not_match() {
        let entries = [entry("Gaming Consoles", "PlayStation 5")];
        assert!(search(&entries, "nintendo").is_empty());
    }

    #[test]
    fn empty_query_matches_everything() {
        let entries = seed::seed_entries();
        assert_eq!(search(&entries, "").len(), entries.len());
    }

    #[test]
    fn results_keep_store_order() {
        let entries = [
            entry("Alpha phones", "x"),
            entry("Beta phones", "y"),
            entry("Gamma tablets", "z"),
            entry("Delta phones", "w"),
        ];
        let hits = search(&entries, "phones");
        let topics: Vec<_> = hits.iter().map(|e| e.topic.as_str()).collect();
        assert_eq!(topics, ["Alpha phones", "Beta phones", "Delta phones"]);
    }

    #[test]
    fn seed_scenario_iphone_query_hits_catalogue() {
        let entries = seed::seed_entries();
        let hits = search(&entries, "iphone 15");
        assert!(hits.iter().any(|e| e.topic == "iPhone 15 Pro Max Details"));
    }
}
