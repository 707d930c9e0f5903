//! Prompt assembly for the completion client.
//!
//! One fixed instruction template with two `{{key}}` interpolation points:
//! the knowledge context block and the customer's question. The template
//! does not vary by category or user — retrieval decides what the model
//! sees, not the framing.
//!
//! When nothing matched, the context section is present but empty. The
//! model is told to fall back to general guidance in that case (directive 8),
//! so the section must not be dropped.

use crate::knowledge::StoredEntry;

const SEPARATOR: &str = "\n\n";

/// Instruction template sent with every customer turn.
const ASSISTANT_TEMPLATE: &str = "\
You are a friendly and knowledgeable electronics store assistant. Your role is to help customers with product information, recommendations, technical support, and purchasing decisions.

Key Instructions:
1. Be professional and helpful in your responses
2. Provide accurate product information including prices in KSh
3. Offer relevant product comparisons and recommendations
4. Include warranty and installation information when applicable
5. Give technical support and troubleshooting guidance
6. Explain store policies clearly (returns, delivery, etc.)
7. Suggest relevant accessories or complementary products
8. If specific information isn't in the knowledge base, provide general guidance based on the product category

Knowledge Base Context:
{{context}}

Customer Question: {{question}}

Please provide a clear, helpful response focusing on our electronics store products and services. Include specific prices, features, and relevant warranty/installation information when available. Be friendly but professional, and always prioritize accurate product information.";

/// Render the matched entries as a context block: `"{topic}:\n{content}"`
/// per entry, blank line between entries, in the order supplied.
pub fn context_block(matched: &[&StoredEntry]) -> String {
    matched
        .iter()
        .map(|e| format!("{}:\n{}", e.topic, e.content))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Embed the context block and the literal question into the template.
pub fn compose(question: &str, matched: &[&StoredEntry]) -> String {
    ASSISTANT_TEMPLATE
        .replace("{{context}}", &context_block(matched))
        .replace("{{question}}", question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{Category, StoredEntry};

    fn entry(topic: &str, content: &str) -> StoredEntry {
        StoredEntry {
            topic: topic.into(),
            content: content.into(),
            category: Category::Products,
            created_by: "system".into(),
            created_at: "2025-11-01T08:00:00Z".into(),
        }
    }

    #[test]
    fn compose_with_no_matches_keeps_empty_context_section() {
        let prompt = compose("do you sell drones?", &[]);
        assert!(prompt.contains("Knowledge Base Context:\n\n"));
        assert!(prompt.contains("Customer Question: do you sell drones?"));
        assert!(!prompt.contains("{{context}}"));
        assert!(!prompt.contains("{{question}}"));
    }

    #[test]
    fn compose_joins_entries_with_blank_line_in_order() {
        let a = entry("topicA", "contentA");
        let b = entry("topicB", "contentB");
        let prompt = compose("q", &[&a, &b]);

        assert!(prompt.contains("topicA:\ncontentA"));
        assert!(prompt.contains("topicB:\ncontentB"));
        assert!(prompt.contains("topicA:\ncontentA\n\ntopicB:\ncontentB"));
    }

    #[test]
    fn compose_embeds_literal_question() {
        let prompt = compose("how much is the LG OLED C3?", &[]);
        assert!(prompt.contains("Customer Question: how much is the LG OLED C3?"));
    }

    #[test]
    fn template_framing_is_fixed() {
        let prompt = compose("anything", &[]);
        assert!(prompt.starts_with("You are a friendly and knowledgeable electronics store assistant."));
        assert!(prompt.contains("prices in KSh"));
        assert!(prompt.contains("8. If specific information isn't in the knowledge base"));
    }

    #[test]
    fn context_block_empty_for_no_entries() {
        assert_eq!(context_block(&[]), "");
    }
}
