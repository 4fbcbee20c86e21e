//! # chatterbox - Streaming Chat CLI
//!
//! `chatterbox` is an interactive command-line chat client for OpenAI-compatible
//! API endpoints. It keeps a conversation transcript, streams responses as they
//! arrive, and falls back to batch requests when streaming fails.
//!
//! ## Features
//!
//! - **Streaming replies**: See the model's answer as it arrives, with a silent
//!   fallback to a batch request if the stream breaks mid-way
//! - **Transcript commands**: View, count, and clear the conversation history
//! - **Slash commands**: `/summarize`, `/translate`, `/save`, `/load`, `/stream`
//! - **Persistence**: Save and reload conversations as JSON files
//!
//! ## Quick Start
//!
//! ```bash
//! # Start a chat session (reads GOOGLE_API_KEY, prompts if unset)
//! chatterbox
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/chatterbox/config.toml`:
//!
//! ```toml
//! [chat]
//! endpoint = "https://generativelanguage.googleapis.com/v1beta/openai"
//! model = "gemini-2.5-flash"
//! api_key_env = "GOOGLE_API_KEY"
//! ```

/// Interactive chat session loop, command parsing, and chat UI.
pub mod chat;

/// Configuration file management and credential resolution.
pub mod config;

/// Response acquisition: streaming/batch orchestration and fallback.
pub mod engine;

/// File system utilities.
pub mod fs;

/// Model gateway: chat-completions client for OpenAI-compatible APIs.
pub mod gateway;

/// Conversation persistence (JSON save/load).
pub mod history;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Conversation transcript store.
pub mod transcript;

/// Terminal UI components (spinner, colors).
pub mod ui;
