//! CLI command definitions.

pub mod auth;
pub mod customers;
pub mod images;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the rentdesk back office.
#[derive(Debug, Parser)]
#[command(name = "rentdesk-client")]
#[command(version, about = "CLI client for the rentdesk back office", long_about = None)]
pub struct Cli {
    /// Backend to talk to.
    #[arg(long, value_enum, env = "RENTDESK_BACKEND", default_value = "remote")]
    pub backend: BackendKind,

    /// Project base URL of the remote backend.
    #[arg(long, env = "RENTDESK_BACKEND_URL", default_value = "http://localhost:54321")]
    pub base_url: String,

    /// Public anon key sent with every remote request.
    #[arg(long, env = "RENTDESK_ANON_KEY", hide_env_values = true, default_value = "")]
    pub anon_key: String,

    /// File the remote session is kept in between invocations.
    #[arg(long, env = "RENTDESK_SESSION_FILE", default_value = ".rentdesk-session.json")]
    pub session_file: PathBuf,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Backend implementations the CLI can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BackendKind {
    /// Hosted backend over HTTP.
    #[default]
    Remote,
    /// In-process backend seeded with demo data. Nothing is persisted.
    Memory,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out and manage passwords.
    Auth(auth::AuthCommand),
    /// Customer management.
    Customers(customers::CustomersCommand),
    /// Inventory image management.
    Images(images::ImagesCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_memory_backend_flag() {
        let cli = Cli::try_parse_from([
            "rentdesk-client",
            "--backend",
            "memory",
            "customers",
            "list",
        ])
        .unwrap();
        assert_eq!(cli.backend, BackendKind::Memory);
    }
}
