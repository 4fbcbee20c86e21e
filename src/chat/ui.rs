//! Chat mode UI components.

use crate::transcript::{Role, Transcript};
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_banner(model: &str, streaming: bool) {
    println!(
        "{} {} - Interactive AI Chat",
        Style::header("chatterbox"),
        Style::version(format!("v{VERSION}"))
    );
    println!(
        "  {}       {}",
        Style::label("model"),
        Style::value(model)
    );
    println!(
        "  {}   {}",
        Style::label("streaming"),
        streaming_status(streaming)
    );
    println!();
    println!(
        "{}",
        Style::hint("Type a message, 'help' for commands, 'quit' to exit")
    );
    println!();
}

pub fn streaming_status(streaming: bool) -> String {
    if streaming {
        Style::success("on")
    } else {
        Style::warning("off")
    }
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_help() {
    println!("{}", Style::header("Session commands"));
    println!(
        "  {}     {}",
        Style::command("clear"),
        Style::secondary("Clear the conversation history")
    );
    println!(
        "  {}   {}",
        Style::command("history"),
        Style::secondary("Show the conversation history")
    );
    println!(
        "  {}     {}",
        Style::command("count"),
        Style::secondary("Count messages by speaker")
    );
    println!(
        "  {}      {}",
        Style::command("help"),
        Style::secondary("Show this help")
    );
    println!(
        "  {}      {}",
        Style::command("quit"),
        Style::secondary("Exit the chat")
    );
    println!();
    print_commands();
}

pub fn print_commands() {
    println!("{}", Style::header("Slash commands"));
    println!(
        "  {}                  {}",
        Style::command("/summarize"),
        Style::secondary("Summarize the conversation")
    );
    println!(
        "  {}  {}",
        Style::command("/translate <lang> <text>"),
        Style::secondary("Translate text to a language")
    );
    println!(
        "  {}           {}",
        Style::command("/save [filename]"),
        Style::secondary("Save the conversation (name optional)")
    );
    println!(
        "  {}           {}",
        Style::command("/load <filename>"),
        Style::secondary("Load a saved conversation")
    );
    println!(
        "  {}                     {}",
        Style::command("/stream"),
        Style::secondary("Toggle streaming mode")
    );
    println!(
        "  {}                   {}",
        Style::command("/commands"),
        Style::secondary("Show this list")
    );
    println!();
}

pub fn print_history(transcript: &Transcript) {
    if transcript.is_empty() {
        println!("{}", Style::secondary("History is empty."));
        println!();
        return;
    }

    println!("{}", Style::header("Conversation history"));
    for (turn, line) in transcript.turns().iter().zip(transcript.render()) {
        match turn.role {
            Role::Human => println!("  {}", Style::human(line)),
            Role::Assistant => println!("  {}", Style::assistant(line)),
        }
    }
    println!();
}

pub fn print_count(human: usize, assistant: usize) {
    println!(
        "{} {human} from you, {assistant} from the AI",
        Style::header("Messages:")
    );
    println!();
}

pub fn print_usage(usage: &str) {
    println!("{} {}", Style::warning("Usage:"), Style::command(usage));
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
