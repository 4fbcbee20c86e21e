//! Conversation transcript store.
//!
//! An ordered sequence of turns, mutated only by completed exchanges,
//! explicit clears, and whole-sequence replacement on load.

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Human,
    Assistant,
}

/// One conversation entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn human(text: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// The ordered conversation history.
///
/// Owned exclusively by the session loop; never shared or static.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub const fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Appends a turn to the end of the conversation.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Rolls back the pending human turn after a failed exchange.
    ///
    /// No-op if the transcript is empty or the last turn is not a human
    /// turn, so a double rollback cannot eat an earlier exchange.
    pub fn remove_last(&mut self) {
        if self.turns.last().is_some_and(|t| t.role == Role::Human) {
            self.turns.pop();
        }
    }

    /// Empties the conversation.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Atomically swaps in a whole new sequence (used by load).
    pub fn replace_all(&mut self, turns: Vec<Turn>) {
        self.turns = turns;
    }

    /// Returns `(human, assistant)` turn counts.
    pub fn count_by_role(&self) -> (usize, usize) {
        let human = self
            .turns
            .iter()
            .filter(|t| t.role == Role::Human)
            .count();
        (human, self.turns.len() - human)
    }

    /// Lazily renders the conversation as numbered display lines.
    pub fn render(&self) -> impl Iterator<Item = String> + '_ {
        self.turns.iter().enumerate().map(|(i, turn)| {
            let speaker = match turn.role {
                Role::Human => "You",
                Role::Assistant => "AI",
            };
            format!("{}. {speaker}: {}", i + 1, turn.text)
        })
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::human("hello"));
        transcript.append(Turn::assistant("hi there"));

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].role, Role::Human);
        assert_eq!(transcript.turns()[1].role, Role::Assistant);
    }

    #[test]
    fn test_remove_last_rolls_back_human_turn() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::human("a"));
        transcript.append(Turn::assistant("b"));
        transcript.append(Turn::human("c"));

        transcript.remove_last();
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_remove_last_is_idempotent() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::human("a"));
        transcript.append(Turn::assistant("b"));
        transcript.append(Turn::human("c"));

        transcript.remove_last();
        transcript.remove_last();

        // The second call must not touch the completed exchange.
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[1].role, Role::Assistant);
    }

    #[test]
    fn test_remove_last_on_empty_is_noop() {
        let mut transcript = Transcript::new();
        transcript.remove_last();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_clear_empties_transcript() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::human("a"));
        transcript.clear();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_replace_all_swaps_sequence() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::human("old"));

        transcript.replace_all(vec![Turn::human("new"), Turn::assistant("reply")]);

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].text, "new");
    }

    #[test]
    fn test_count_by_role() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::human("a"));
        transcript.append(Turn::assistant("b"));
        transcript.append(Turn::human("c"));

        assert_eq!(transcript.count_by_role(), (2, 1));
    }

    #[test]
    fn test_render_tags_lines_by_role() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::human("hello"));
        transcript.append(Turn::assistant("hi"));

        let lines: Vec<String> = transcript.render().collect();
        assert_eq!(lines, vec!["1. You: hello", "2. AI: hi"]);
    }

    #[test]
    fn test_render_is_restartable() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::human("hello"));

        assert_eq!(transcript.render().count(), 1);
        assert_eq!(transcript.render().count(), 1);
    }
}
