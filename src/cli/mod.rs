//! CLI module
//!
//! Command-line interface for streaming query results to stdout.
//!
//! # Commands
//!
//! - `search` - Text or related-video search
//! - `popular` - Trending videos
//! - `by-id` - Look up videos by id

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PagingArgs};
pub use runner::Runner;
