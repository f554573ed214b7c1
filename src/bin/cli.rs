//! Chat Assistant - command-line chat client
//!
//! This is the CLI entry point for the chat-assistant tool.
//! Run with: cargo run --bin chat-assistant

use chat_assistant::{get_messages, AppSettings, ChatSession, CompletionRequester, ModelClient};
use std::env;
use std::io;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    // Initialize tracing on stderr so it never mixes with the conversation
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let settings = match AppSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            let lang = env::var("ASSISTANT_LANG").unwrap_or_default();
            tracing::debug!(error = %e, "Invalid configuration");
            println!("{}", get_messages(&lang).missing_api_key);
            std::process::exit(1);
        }
    };

    let messages = get_messages(&settings.lang);
    tracing::info!(
        base_url = %settings.base_url,
        lang = %settings.lang,
        max_attempts = settings.max_attempts,
        retry_delay = settings.retry_delay,
        "Starting chat assistant"
    );

    let client = ModelClient::new(settings.model_config())?;
    let requester = CompletionRequester::new(client)
        .with_policy(settings.retry_policy())
        .with_messages(messages);
    let session = ChatSession::new(requester, messages);

    // Answer once when the prompt is given as arguments
    let args: Vec<String> = env::args().skip(1).collect();
    if !args.is_empty() {
        let prompt = args.join(" ");
        session.answer(&prompt, &mut io::stdout()).await?;
        return Ok(());
    }

    session.run(io::stdin().lock(), io::stdout()).await?;

    Ok(())
}
