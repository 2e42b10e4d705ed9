//! Keyword classifier for canned assistant replies.
//!
//! Matching is a case-insensitive substring test against a fixed keyword
//! list. The first matching topic wins, so "business tax advice" is a tax
//! question.

use serde::{Deserialize, Serialize};

/// Greeting the assistant opens every session with.
pub const GREETING: &str = "Hi! I'm your AI financial assistant. How can I help you today? 😊";

/// Suggested prompts offered before the user has said anything.
pub static QUICK_QUESTIONS: [&str; 4] = [
    "What are the latest tax changes?",
    "How should I diversify my portfolio?",
    "What's the current market outlook?",
    "Help me with business planning",
];

const TAX_REPLY: &str = "Great question about taxes! 📊 Our tax experts recommend staying updated with the latest changes. You can find detailed guides in our Education section, or schedule a consultation with our tax specialists for personalized advice.";

const INVESTMENT_REPLY: &str = "Investment strategies are crucial for long-term wealth building! 📈 I'd recommend checking out our Investment Portfolio Management course or reading our latest market analysis. Would you like me to connect you with one of our investment advisors?";

const BUSINESS_REPLY: &str = "Business planning is essential for success! 🏢 Our Business Finance learning path covers everything from financial management to strategic planning. You can also explore our business-focused articles in the News section.";

const MARKET_REPLY: &str = "Market conditions are always evolving! 📊 Our economics team regularly publishes market outlooks and analysis. Check out our latest economic reports in the News section, or consider our Economic Analysis for Business course.";

const GENERAL_REPLY: &str = "Thanks for your question! 💭 I'm here to help with any financial, tax, investment, or business-related queries. You can also explore our comprehensive resources in the Education section or read our latest insights in the News section. Is there a specific topic you'd like to know more about?";

/// Topic a piece of user text is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Tax,
    Investment,
    Business,
    Market,
    /// Nothing matched.
    General,
}

impl Topic {
    /// Keyword topics in match priority order.
    const KEYWORDS: [(&'static str, Topic); 4] = [
        ("tax", Topic::Tax),
        ("invest", Topic::Investment),
        ("business", Topic::Business),
        ("market", Topic::Market),
    ];

    /// Route `text` to a topic.
    pub fn detect(text: &str) -> Topic {
        let lower = text.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map_or(Topic::General, |(_, topic)| *topic)
    }

    /// The fixed reply for this topic.
    pub fn reply(self) -> &'static str {
        match self {
            Topic::Tax => TAX_REPLY,
            Topic::Investment => INVESTMENT_REPLY,
            Topic::Business => BUSINESS_REPLY,
            Topic::Market => MARKET_REPLY,
            Topic::General => GENERAL_REPLY,
        }
    }
}

/// Map user text to the assistant's canned reply.
pub fn classify(text: &str) -> &'static str {
    Topic::detect(text).reply()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_topic() {
        assert_eq!(classify("I have a TAX question"), TAX_REPLY);
        assert_eq!(classify("How to invest wisely"), INVESTMENT_REPLY);
        assert_eq!(classify("growing my business"), BUSINESS_REPLY);
        assert_eq!(classify("market outlook today"), MARKET_REPLY);
        assert_eq!(classify("hello there"), GENERAL_REPLY);
    }

    #[test]
    fn test_classify_is_deterministic() {
        for text in [
            "",
            "tax",
            "Investments",
            "¿qué tal?",
            "MARKET",
            "random words",
        ] {
            assert_eq!(classify(text), classify(text));
        }
    }

    #[test]
    fn test_tax_wins_over_business() {
        assert_eq!(Topic::detect("business tax advice"), Topic::Tax);
        assert_eq!(classify("business tax advice"), TAX_REPLY);
    }

    #[test]
    fn test_priority_order_full_chain() {
        assert_eq!(Topic::detect("market investing"), Topic::Investment);
        assert_eq!(Topic::detect("business market"), Topic::Business);
        assert_eq!(Topic::detect("Market Watch"), Topic::Market);
    }

    #[test]
    fn test_substring_matching() {
        // Substring, not word, matching.
        assert_eq!(Topic::detect("investors"), Topic::Investment);
        assert_eq!(Topic::detect("marketplace"), Topic::Market);
        assert_eq!(Topic::detect("syntax"), Topic::Tax);
    }

    #[test]
    fn test_empty_text_falls_back() {
        assert_eq!(Topic::detect(""), Topic::General);
        assert_eq!(Topic::detect("   "), Topic::General);
    }

    #[test]
    fn test_quick_questions_route_to_topics() {
        assert_eq!(Topic::detect(QUICK_QUESTIONS[0]), Topic::Tax);
        assert_eq!(Topic::detect(QUICK_QUESTIONS[1]), Topic::General);
        assert_eq!(Topic::detect(QUICK_QUESTIONS[2]), Topic::Market);
        assert_eq!(Topic::detect(QUICK_QUESTIONS[3]), Topic::Business);
    }
}
