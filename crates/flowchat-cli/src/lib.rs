pub mod commands;
pub mod config;
pub mod error;
pub mod repl;
pub mod terminal;

pub use commands::Command;
pub use config::Config;
pub use error::CliError;
pub use terminal::Terminal;
