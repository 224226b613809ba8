//! One-click prompt shortcuts shown under the transcript.

/// Suggested prompts, in display order.
pub const SUGGESTED_PROMPTS: [&str; 4] = [
    "Who are the founders?",
    "What services do you offer?",
    "How do I start a project?",
    "Where are you based?",
];

/// Look up a suggestion by position.
pub fn suggestion(index: usize) -> Option<&'static str> {
    SUGGESTED_PROMPTS.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_lookup() {
        assert_eq!(suggestion(0), Some("Who are the founders?"));
        assert_eq!(suggestion(SUGGESTED_PROMPTS.len()), None);
    }
}
