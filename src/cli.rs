use std::path::PathBuf;

use clap::Parser;

use crate::{
    core::AppConfig,
    persistence::DataDir,
};

/// Desktop client for a note-taking service.
#[derive(Clone, Debug, Eq, Parser, PartialEq)]
#[command(version, author, about)]
pub struct CliArgs {
    /// Service root, e.g. http://localhost:3001/api
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Show a notification when the startup note fetch fails
    #[arg(long, default_value_t = false)]
    pub notify_load_errors: bool,

    /// Where config.json and the saved session live
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl CliArgs {
    pub fn data_dir(&self) -> DataDir {
        match &self.data_dir {
            Some(path) => DataDir::new(path),
            None => DataDir::default_location(),
        }
    }

    /// Command-line flags win over the config file.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        if self.notify_load_errors {
            config.notify_on_initial_load_failure = true;
        }
    }
}
