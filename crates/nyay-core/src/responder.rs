//! Keyword chat responder.
//!
//! The responder is the pluggable "bot" behind the message logging flow.
//! [`KeywordResponder`] is the stock implementation: it lower-cases the input
//! and returns the reply of the first rule whose keyword is a substring of
//! it.  Rules are tried in order, so an earlier keyword always wins over a
//! later one even if both occur.

/// Maps one user message to one bot reply.
///
/// Implementations must be total: every input, including the empty string,
/// yields a reply.
pub trait Responder: Send + Sync {
    fn respond(&self, input: &str) -> String;
}

/// A single `(keyword, reply)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    keyword: String,
    reply: String,
}

impl KeywordRule {
    pub fn new(keyword: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            reply: reply.into(),
        }
    }

    /// Lower-case keyword matched as a substring.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }

    fn matches(&self, lowered_input: &str) -> bool {
        lowered_input.contains(self.keyword.as_str())
    }
}

pub const HELLO_REPLY: &str = "Hello there! How can I assist you with your account today?";
pub const WEATHER_REPLY: &str = "I am a chat history bot and don't have access to live weather data. Try asking about your recent conversations!";
pub const NAME_REPLY: &str = "I am the Gemini chat assistant, here to log your conversations.";
pub const FALLBACK_REPLY: &str = "I'm not sure how to respond to that, but I'm learning! Is there anything else I can help you save?";

/// First-match keyword table with a fixed fallback.
#[derive(Debug, Clone)]
pub struct KeywordResponder {
    rules: Vec<KeywordRule>,
    fallback: String,
}

impl KeywordResponder {
    pub fn new(rules: Vec<KeywordRule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }
}

impl Default for KeywordResponder {
    fn default() -> Self {
        Self::new(
            vec![
                KeywordRule::new("hello", HELLO_REPLY),
                KeywordRule::new("weather", WEATHER_REPLY),
                KeywordRule::new("name", NAME_REPLY),
            ],
            FALLBACK_REPLY,
        )
    }
}

impl Responder for KeywordResponder {
    fn respond(&self, input: &str) -> String {
        let lowered = input.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.reply.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hello_wins_regardless_of_case_and_position() {
        let bot = KeywordResponder::default();
        for input in ["hello", "HeLLo", "well, HELLO there", "say hello about the weather and my name"] {
            assert_eq!(bot.respond(input), HELLO_REPLY, "input: {input}");
        }
    }

    #[test]
    fn earlier_rule_beats_later_rule() {
        let bot = KeywordResponder::default();
        assert_eq!(bot.respond("what's your name and the weather?"), WEATHER_REPLY);
    }

    #[test]
    fn name_question_gets_name_reply() {
        let bot = KeywordResponder::default();
        let reply = bot.respond("What's your name?");
        assert_eq!(reply, NAME_REPLY);
    }

    #[test]
    fn unmatched_and_empty_inputs_fall_back() {
        let bot = KeywordResponder::default();
        assert_eq!(bot.respond(""), FALLBACK_REPLY);
        assert_eq!(bot.respond("Explain Section 125 CrPC"), FALLBACK_REPLY);
        assert_eq!(bot.respond("h e l l o"), FALLBACK_REPLY);
    }

    #[test]
    fn custom_keywords_are_normalised_to_lower_case() {
        let bot = KeywordResponder::new(vec![KeywordRule::new("NDA", "drafting")], "nope");
        assert_eq!(bot.rules()[0].keyword(), "nda");
        assert_eq!(bot.rules()[0].reply(), "drafting");
        assert_eq!(bot.respond("Draft an nda please"), "drafting");
        assert_eq!(bot.respond("DRAFT AN NDA"), "drafting");
        assert_eq!(bot.respond("lease"), "nope");
    }

    #[test]
    fn usable_as_trait_object() {
        let bot: Box<dyn Responder> = Box::new(KeywordResponder::default());
        assert_eq!(bot.respond("weather today?"), WEATHER_REPLY);
    }
}
