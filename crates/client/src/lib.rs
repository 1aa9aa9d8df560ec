//! rentdesk_client - remote backend client and CLI for rentdesk.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;
pub mod session_file;

pub use client::RemoteClient;
pub use error::{ClientError, Result};
