pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "newsticker", version)]
#[command(about = "An always-on-top news ticker for your terminal", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/newsticker/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Feed URL to show instead of the configured list (repeatable)
    #[arg(long = "feed", value_name = "URL", global = true)]
    pub feeds: Vec<String>,

    /// Number of feeds fetched concurrently
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Where the window position is remembered
    #[arg(long, global = true)]
    pub position_file: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the ticker overlay (default)
    Show,
    /// Fetch the feeds and print the headlines
    List,
    /// Forget the remembered window position
    ResetPosition,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if !self.feeds.is_empty() {
            config.feeds = self.feeds.clone();
        }
        if let Some(workers) = self.workers {
            config.fetch.workers = workers;
        }
        if let Some(path) = &self.position_file {
            config.overlay.position_file = Some(path.clone());
        }
    }
}
