use anyhow::Result;
use clap::Parser;

use chatterbox_cli::chat::ChatSession;
use chatterbox_cli::config;
use chatterbox_cli::gateway::ChatClient;
use chatterbox_cli::ui::Style;

/// Interactive AI chat CLI. The session itself is fully interactive; there
/// are no functional flags.
#[derive(Parser, Debug)]
#[command(name = "chatterbox")]
#[command(about = "Interactive streaming chat CLI for OpenAI-compatible endpoints")]
#[command(version)]
struct Args {}

#[tokio::main]
async fn main() -> Result<()> {
    let _args = Args::parse();

    let config = config::load_config()?.chat;

    let api_key = match config::resolve_api_key(&config.api_key_env) {
        Ok(key) => key,
        Err(e) => {
            eprintln!("{} {e:#}", Style::error("Error:"));
            std::process::exit(exitcode::CONFIG);
        }
    };

    let client = match ChatClient::new(config.endpoint, config.model.clone(), Some(api_key)) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} {e:#}", Style::error("Error:"));
            std::process::exit(exitcode::UNAVAILABLE);
        }
    };

    let mut session = ChatSession::new(client, config.model);
    session.run().await
}
