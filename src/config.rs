//! Configuration and CLI argument handling

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use directories::ProjectDirs;

use crate::{
    services::{JsonFileStore, MemoryStore, SnapshotStore},
    state::{ControllerOptions, Theme},
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "focus-timer")]
#[command(about = "A state-managed HTTP server driving a Pomodoro focus timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "5000")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Session snapshot file (defaults to the user data directory)
    #[arg(short, long, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long, conflicts_with = "state_file")]
    pub ephemeral: bool,

    /// Theme the `auto` preference resolves to
    #[arg(long, value_enum, default_value_t = Theme::Light)]
    pub system_theme: Theme,

    /// Leave the completion tone out of completion events
    #[arg(long)]
    pub mute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            system_theme: self.system_theme,
            tone_enabled: !self.mute,
            ..ControllerOptions::default()
        }
    }

    /// Resolve where the snapshot lives; `None` for ephemeral runs
    pub fn state_path(&self) -> anyhow::Result<Option<PathBuf>> {
        if self.ephemeral {
            return Ok(None);
        }
        if let Some(path) = &self.state_file {
            return Ok(Some(path.clone()));
        }

        let dirs = ProjectDirs::from("com", "focus-timer", "focus-timer")
            .context("Failed to determine the user data directory")?;
        Ok(Some(dirs.data_dir().join("session.json")))
    }

    /// Build the snapshot store selected on the command line
    pub fn store(&self) -> anyhow::Result<Arc<dyn SnapshotStore>> {
        Ok(match self.state_path()? {
            Some(path) => Arc::new(JsonFileStore::new(path)),
            None => Arc::new(MemoryStore::new()),
        })
    }
}
