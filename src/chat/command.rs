//! User input classification and slash command parsing.

use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/summarize", "Summarize the conversation"),
    ("/translate", "Translate text to a language"),
    ("/save", "Save the conversation to a file"),
    ("/load", "Load a saved conversation"),
    ("/stream", "Toggle streaming mode"),
    ("/commands", "Show available slash commands"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

/// Bare session control keywords (no network calls).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Exit,
    Clear,
    Help,
    History,
    Count,
}

/// Slash command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Summarize,
    Translate { language: String, text: String },
    Save { filename: Option<String> },
    Load { filename: String },
    Stream,
    Commands,
    MissingArgument { usage: &'static str },
    Unknown(String),
}

/// Input types
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Empty,
    Control(ControlCommand),
    Command(SlashCommand),
    Message(String),
}

/// Classifies one line of raw user input.
///
/// Control keywords are case-insensitive and accept the Portuguese synonyms
/// the original command set used.
pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    if let Some(control) = parse_control(input) {
        return Input::Control(control);
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Message(input.to_string()), parse_slash_command)
}

fn parse_control(input: &str) -> Option<ControlCommand> {
    match input.to_lowercase().as_str() {
        "quit" | "exit" | "sair" => Some(ControlCommand::Exit),
        "clear" | "limpar" => Some(ControlCommand::Clear),
        "help" | "ajuda" => Some(ControlCommand::Help),
        "history" | "historico" | "histórico" => Some(ControlCommand::History),
        "count" | "contar" => Some(ControlCommand::Count),
        _ => None,
    }
}

fn parse_slash_command(cmd: &str) -> Input {
    let mut parts = cmd.splitn(2, ' ');
    let name = parts.next().unwrap_or_default().to_lowercase();
    let rest = parts.next().map(str::trim).unwrap_or_default();

    let command = match name.as_str() {
        "summarize" | "resumir" => SlashCommand::Summarize,
        "translate" | "traduzir" => parse_translate(rest),
        "save" | "salvar" => SlashCommand::Save {
            filename: (!rest.is_empty()).then(|| rest.to_string()),
        },
        "load" | "carregar" => {
            if rest.is_empty() {
                SlashCommand::MissingArgument {
                    usage: "/load <filename>",
                }
            } else {
                SlashCommand::Load {
                    filename: rest.to_string(),
                }
            }
        }
        "stream" => SlashCommand::Stream,
        "commands" | "comandos" => SlashCommand::Commands,
        _ => SlashCommand::Unknown(name),
    };

    Input::Command(command)
}

// Grammar: /translate <language> <text...>, where the text keeps its spaces.
fn parse_translate(args: &str) -> SlashCommand {
    let mut parts = args.splitn(2, ' ');
    let language = parts.next().unwrap_or_default();
    let text = parts.next().map(str::trim).unwrap_or_default();

    if language.is_empty() || text.is_empty() {
        return SlashCommand::MissingArgument {
            usage: "/translate <language> <text>",
        };
    }

    SlashCommand::Translate {
        language: language.to_string(),
        text: text.to_string(),
    }
}
