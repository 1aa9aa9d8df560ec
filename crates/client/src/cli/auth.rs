//! Auth CLI commands.

use clap::{Parser, Subcommand};

/// Authentication commands.
#[derive(Debug, Parser)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub action: AuthAction,
}

/// Available auth actions.
#[derive(Debug, Subcommand)]
pub enum AuthAction {
    /// Sign in and show the resolved profile and outlets.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long, env = "RENTDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored session.
    Logout,
    /// Show the current session.
    Session,
    /// Show the signed-in user's profile and outlets.
    Whoami,
    /// Email a password reset link.
    ResetPassword {
        /// Account email.
        #[arg(long)]
        email: String,
    },
    /// Change the signed-in user's password.
    UpdatePassword {
        /// New password.
        #[arg(long, env = "RENTDESK_NEW_PASSWORD", hide_env_values = true)]
        password: String,
    },
}
