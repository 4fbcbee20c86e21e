//! One-shot prompts for the summarize and translate commands.

pub const SUMMARY_PROMPT: &str =
    "Please write a concise summary of our conversation so far.";

pub fn build_translation_prompt(target_language: &str, text: &str) -> String {
    format!("Translate the following text to {target_language}: {text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_translation_prompt() {
        let prompt = build_translation_prompt("French", "good morning");
        assert!(prompt.contains("French"));
        assert!(prompt.ends_with("good morning"));
    }
}
