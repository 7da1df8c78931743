//! CLI commands and argument parsing

use crate::types::LogLevel;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Stream results from the YouTube Data API
#[derive(Parser, Debug)]
#[command(name = "youtube-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API key (overrides config file and environment)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LogLevel,

    /// Verbose output (same as --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective log level
    pub fn level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            self.log_level.into()
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for videos, channels and playlists
    Search {
        /// Free-text query
        #[arg(short, long)]
        query: Option<String>,

        /// Find videos related to this video id
        #[arg(long)]
        related_to: Option<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// List trending videos
    Popular {
        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Look up videos by id
    ById {
        /// Video ids (space or comma separated)
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<String>,
    },
}

/// Paging and filter options shared by list commands
#[derive(Args, Debug, Clone, Default)]
pub struct PagingArgs {
    /// Maximum pages to fetch (0 = all)
    #[arg(long, default_value = "1")]
    pub max_pages: u32,

    /// Results per page (1-50)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Extra request parameter, e.g. regionCode=GB (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub filters: Vec<(String, String)>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one item per line)
    Json,
    /// Human-readable output
    Pretty,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    Ok((key.to_string(), value.to_string()))
}
