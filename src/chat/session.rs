use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use std::io::{self, Write};

use super::command::{
    ControlCommand, Input, SlashCommand, SlashCommandCompleter, parse_input,
};
use super::ui;
use crate::engine::{AcquireError, AcquireMode, acquire_response};
use crate::gateway::{ModelGateway, SUMMARY_PROMPT, build_translation_prompt};
use crate::history;
use crate::transcript::{Transcript, Turn};
use crate::ui::{Spinner, Style};

/// An interactive chat session.
///
/// Owns the transcript and streaming flag for the whole session; both are
/// plain fields on the single-threaded loop, never shared or static.
pub struct ChatSession<G: ModelGateway> {
    gateway: G,
    model: String,
    transcript: Transcript,
    streaming: bool,
}

impl<G: ModelGateway> ChatSession<G> {
    /// Creates a new session. Streaming starts enabled.
    pub fn new(gateway: G, model: String) -> Self {
        Self {
            gateway,
            model,
            transcript: Transcript::new(),
            streaming: true,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_banner(&self.model, self.streaming);

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        // Non-highlighted suggestions: gray
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        // Highlighted suggestion: purple
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Type a message, /commands for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Control(ControlCommand::Exit) => break,
                    Input::Control(cmd) => self.handle_control(cmd),
                    Input::Command(cmd) => self.handle_slash(cmd).await,
                    Input::Message(text) => self.exchange(text).await,
                },
                Err(
                    inquire::InquireError::OperationCanceled
                    | inquire::InquireError::OperationInterrupted,
                ) => {
                    println!(); // Clear line before goodbye message
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    fn handle_control(&mut self, cmd: ControlCommand) {
        match cmd {
            ControlCommand::Clear => {
                self.transcript.clear();
                println!("{} History cleared", Style::success("✓"));
                println!();
            }
            ControlCommand::Help => ui::print_help(),
            ControlCommand::History => ui::print_history(&self.transcript),
            ControlCommand::Count => {
                let (human, assistant) = self.transcript.count_by_role();
                ui::print_count(human, assistant);
            }
            // Exit is handled by the loop itself.
            ControlCommand::Exit => {}
        }
    }

    async fn handle_slash(&mut self, cmd: SlashCommand) {
        match cmd {
            SlashCommand::Summarize => self.summarize().await,
            SlashCommand::Translate { language, text } => {
                self.translate(&language, &text).await;
            }
            SlashCommand::Save { filename } => self.save(filename),
            SlashCommand::Load { filename } => self.load(&filename),
            SlashCommand::Stream => {
                self.streaming = !self.streaming;
                println!(
                    "{} Streaming is now {}",
                    Style::success("✓"),
                    ui::streaming_status(self.streaming)
                );
                println!();
            }
            SlashCommand::Commands => ui::print_commands(),
            SlashCommand::MissingArgument { usage } => ui::print_usage(usage),
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
                println!("{}", Style::hint("See /commands for the full list"));
                println!();
            }
        }
    }

    /// One full request cycle: append the human turn, acquire a response,
    /// append the assistant turn on success or roll back on failure.
    async fn exchange(&mut self, text: String) {
        self.transcript.append(Turn::human(text));

        let mode = if self.streaming {
            AcquireMode::Streaming
        } else {
            AcquireMode::Batch
        };

        let spinner = Spinner::new("Thinking...");
        let mut shown = String::new();

        let result = acquire_response(&self.gateway, self.transcript.turns(), mode, |fragment| {
            if shown.is_empty() {
                spinner.stop();
                print!("{} ", Style::assistant("AI:"));
            }
            print!("{fragment}");
            let _ = io::stdout().flush();
            shown.push_str(fragment);
        })
        .await;

        spinner.stop();

        match result {
            Ok(turn) => {
                if shown.trim() == turn.text {
                    println!();
                } else {
                    // Nothing streamed, or the stream broke and the batch
                    // fallback produced the authoritative text.
                    if !shown.is_empty() {
                        println!();
                    }
                    println!("{} {}", Style::assistant("AI:"), turn.text);
                }
                println!();
                self.transcript.append(turn);
            }
            Err(err) => {
                if !shown.is_empty() {
                    println!();
                }
                let message = match err {
                    AcquireError::Provider(e) => format!("{e:#}"),
                    AcquireError::EmptyResponse => {
                        "The model returned an empty response. Try rephrasing.".to_string()
                    }
                };
                ui::print_error(&message);
                self.transcript.remove_last();
            }
        }
    }

    /// One-shot summary of the conversation. Displayed, never appended.
    async fn summarize(&mut self) {
        if self.transcript.is_empty() {
            println!("{}", Style::secondary("Nothing to summarize yet."));
            println!();
            return;
        }

        let mut turns = self.transcript.turns().to_vec();
        turns.push(Turn::human(SUMMARY_PROMPT));

        if let Some(summary) = self.one_shot(&turns, "Summarizing...").await {
            println!("{}", Style::header("Summary"));
            println!("{summary}");
            println!();
        }
    }

    /// One-shot translation. Displayed, never appended.
    async fn translate(&mut self, language: &str, text: &str) {
        let turns = vec![Turn::human(build_translation_prompt(language, text))];

        if let Some(translation) = self.one_shot(&turns, "Translating...").await {
            println!("{} {translation}", Style::header("Translation:"));
            println!();
        }
    }

    async fn one_shot(&self, turns: &[Turn], progress: &str) -> Option<String> {
        let spinner = Spinner::new(progress);
        let result = self.gateway.invoke(turns).await;
        spinner.stop();

        match result {
            Ok(turn) if !turn.text.trim().is_empty() => Some(turn.text.trim().to_string()),
            Ok(_) => {
                ui::print_error("The model returned an empty response.");
                None
            }
            Err(e) => {
                ui::print_error(&format!("{e:#}"));
                None
            }
        }
    }

    fn save(&self, filename: Option<String>) {
        if self.transcript.is_empty() {
            println!("{}", Style::secondary("Nothing to save yet."));
            println!();
            return;
        }

        let filename = filename.unwrap_or_else(history::default_filename);

        match history::save_conversation(self.transcript.turns(), &filename) {
            Ok(()) => {
                println!(
                    "{} Conversation saved to {}",
                    Style::success("✓"),
                    Style::value(&filename)
                );
                println!();
            }
            Err(e) => ui::print_error(&format!("{e:#}")),
        }
    }

    fn load(&mut self, filename: &str) {
        match history::load_conversation(filename) {
            Ok(turns) if turns.is_empty() => {
                println!(
                    "{} {} contains no messages",
                    Style::warning("Warning:"),
                    Style::value(filename)
                );
                println!();
            }
            Ok(turns) => {
                let count = turns.len();
                self.transcript.replace_all(turns);
                println!(
                    "{} Loaded {count} messages from {}",
                    Style::success("✓"),
                    Style::value(filename)
                );
                println!();
            }
            Err(e) => ui::print_error(&format!("{e:#}")),
        }
    }

    #[cfg(test)]
    pub(crate) fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    #[cfg(test)]
    pub(crate) const fn streaming(&self) -> bool {
        self.streaming
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::gateway::FragmentStream;
    use crate::transcript::Role;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Gateway that answers every invoke with a fixed reply and never streams.
    struct EchoGateway {
        reply: &'static str,
        invoke_calls: AtomicUsize,
    }

    impl EchoGateway {
        fn new(reply: &'static str) -> Self {
            Self {
                reply,
                invoke_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ModelGateway for EchoGateway {
        async fn invoke(&self, _turns: &[Turn]) -> Result<Turn> {
            self.invoke_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Turn::assistant(self.reply))
        }

        async fn stream(&self, _turns: &[Turn]) -> Result<FragmentStream> {
            Err(anyhow!("streaming disabled in this test"))
        }
    }

    /// Gateway where every call fails.
    struct DownGateway;

    #[async_trait]
    impl ModelGateway for DownGateway {
        async fn invoke(&self, _turns: &[Turn]) -> Result<Turn> {
            Err(anyhow!("provider down"))
        }

        async fn stream(&self, _turns: &[Turn]) -> Result<FragmentStream> {
            Err(anyhow!("provider down"))
        }
    }

    fn session<G: ModelGateway>(gateway: G) -> ChatSession<G> {
        ChatSession::new(gateway, "test-model".to_string())
    }

    #[tokio::test]
    async fn test_successful_exchanges_alternate_strictly() {
        let mut session = session(EchoGateway::new("reply"));

        for i in 0..3 {
            session.exchange(format!("message {i}")).await;
        }

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 6);
        for (i, turn) in transcript.turns().iter().enumerate() {
            let expected = if i % 2 == 0 { Role::Human } else { Role::Assistant };
            assert_eq!(turn.role, expected);
        }
    }

    #[tokio::test]
    async fn test_failed_exchange_rolls_back_human_turn() {
        let mut session = session(DownGateway);

        session.exchange("first try".to_string()).await;

        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_failure_after_success_rolls_back_exactly_one_turn() {
        let mut good = session(EchoGateway::new("reply"));
        good.exchange("hello".to_string()).await;
        let turns = good.transcript().turns().to_vec();

        let mut bad = session(DownGateway);
        bad.transcript.replace_all(turns);
        bad.exchange("this will fail".to_string()).await;

        assert_eq!(bad.transcript().len(), 2);
        assert_eq!(bad.transcript().turns()[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_stream_toggle_twice_restores_flag() {
        let mut session = session(EchoGateway::new("reply"));
        let original = session.streaming();

        session.handle_slash(SlashCommand::Stream).await;
        assert_ne!(session.streaming(), original);

        session.handle_slash(SlashCommand::Stream).await;
        assert_eq!(session.streaming(), original);
    }

    #[tokio::test]
    async fn test_translate_missing_arguments_has_no_side_effects() {
        let gateway = EchoGateway::new("reply");
        let mut session = session(gateway);

        session
            .handle_slash(SlashCommand::MissingArgument {
                usage: "/translate <language> <text>",
            })
            .await;

        assert!(session.transcript().is_empty());
        assert_eq!(session.gateway.invoke_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_translate_does_not_touch_transcript() {
        let mut session = session(EchoGateway::new("Bonjour"));

        session
            .handle_slash(SlashCommand::Translate {
                language: "french".to_string(),
                text: "hello".to_string(),
            })
            .await;

        assert!(session.transcript().is_empty());
        assert_eq!(session.gateway.invoke_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_summarize_on_empty_transcript_skips_gateway() {
        let mut session = session(EchoGateway::new("summary"));

        session.handle_slash(SlashCommand::Summarize).await;

        assert_eq!(session.gateway.invoke_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_summarize_displays_without_appending() {
        let mut session = session(EchoGateway::new("a short summary"));
        session.exchange("hello".to_string()).await;

        session.handle_slash(SlashCommand::Summarize).await;

        // One exchange only; the summary turn was never appended.
        assert_eq!(session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_clear_control_empties_transcript() {
        let mut session = session(EchoGateway::new("reply"));
        session.exchange("hello".to_string()).await;

        session.handle_control(ControlCommand::Clear);

        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip_through_session() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("chat.json");
        let path = path.to_str().unwrap().to_string();

        let mut session = session(EchoGateway::new("reply"));
        session.exchange("hello".to_string()).await;
        session
            .handle_slash(SlashCommand::Save {
                filename: Some(path.clone()),
            })
            .await;

        session.handle_control(ControlCommand::Clear);
        assert!(session.transcript().is_empty());

        session
            .handle_slash(SlashCommand::Load { filename: path })
            .await;

        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript().turns()[0].text, "hello");
    }

    #[tokio::test]
    async fn test_load_missing_file_leaves_transcript_untouched() {
        let mut session = session(EchoGateway::new("reply"));
        session.exchange("hello".to_string()).await;

        session
            .handle_slash(SlashCommand::Load {
                filename: "/nonexistent/chat.json".to_string(),
            })
            .await;

        assert_eq!(session.transcript().len(), 2);
    }
}
