use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use flowchat_cli::{
    config::{Config, LoggingConfig},
    repl, CliError, Terminal,
};
use flowchat_llm::OpenAICompatClient;
use flowchat_workflow::ChatSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    init_logging(&config.logging);

    tracing::info!(
        base_url = %config.api.base_url,
        model = %config.api.model,
        "Starting flowchat"
    );

    let client = OpenAICompatClient::new(config.client_config()).map_err(CliError::Client)?;
    let mut session = ChatSession::new(Arc::new(client), config.session_config())
        .with_render_options(config.render_options());

    let mut terminal = Terminal::new(std::io::stdout());
    terminal
        .notice(&format!(
            "Chatting with {} at {}. Type /help for commands.",
            config.api.model, config.api.base_url
        ))
        .map_err(CliError::from)?;

    repl::run(&mut session, BufReader::new(tokio::io::stdin()), &mut terminal).await?;

    tracing::info!(
        messages = session.conversation().len(),
        "Session ended"
    );

    Ok(())
}

/// Logs go to stderr so the conversation on stdout stays readable
fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
