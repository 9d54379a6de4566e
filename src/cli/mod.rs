//! CLI module for vidnotes.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// vidnotes - transcript-grounded note autocomplete for YouTube videos
///
/// Paste a video URL, take notes, and get suggestions drawn from what the video actually says.
#[derive(Parser, Debug)]
#[command(name = "vidnotes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to server.host from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port from config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Fetch a video's transcript and show how it would be chunked
    Fetch {
        /// YouTube URL (watch, youtu.be or embed form)
        url: String,

        /// Write the transcript text to a file
        #[arg(short, long)]
        output: Option<String>,

        /// Print each chunk
        #[arg(long)]
        chunks: bool,
    },

    /// Get a one-off autocomplete suggestion for some notes on a video
    Suggest {
        /// YouTube URL (watch, youtu.be or embed form)
        url: String,

        /// Notes written so far
        notes: String,

        /// Number of transcript chunks to use as context
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Print the retrieved context as well
        #[arg(long)]
        show_context: bool,
    },

    /// Check API credentials and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
