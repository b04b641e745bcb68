use config::ConfigError;
use thiserror::Error;

/// Startup failures of the terminal client
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0} environment variable is required")]
    MissingApiKey(&'static str),

    #[error("Failed to create chat client: {0:#}")]
    Client(anyhow::Error),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CliError::MissingApiKey("FLOWCHAT_API_KEY");
        assert_eq!(err.to_string(), "FLOWCHAT_API_KEY environment variable is required");

        let err = CliError::Client(anyhow::anyhow!("bad header").context("building client"));
        assert_eq!(err.to_string(), "Failed to create chat client: building client: bad header");
    }
}
