//! CLI for the Insight server
//!
//! A single `serve` subcommand boots the application and binds the
//! listener.

pub mod serve;

use clap::{Parser, Subcommand};

/// Insight BI server
#[derive(Parser)]
#[command(name = "insight-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(serve::ServeArgs),
}
