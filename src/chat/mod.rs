//! Interactive chat session.
//!
//! Provides the REPL loop, input classification, and the chat UI.

/// Input classification, slash command parsing, and autocomplete.
pub mod command;
mod session;
mod ui;

pub use session::ChatSession;
