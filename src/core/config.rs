use std::time::Duration;

use reqwest::Url;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::NoteAppError,
    persistence::DataDir,
};

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_SESSION_FILE: &str = "logged_note_app_user.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub notification_secs: u64,
    /// Startup fetch failures are only logged unless this is set.
    pub notify_on_initial_load_failure: bool,
    pub session_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001/api".to_string(),
            request_timeout_secs: 10,
            notification_secs: 5,
            notify_on_initial_load_failure: false,
            session_file: DEFAULT_SESSION_FILE.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(data_dir: &DataDir) -> Self {
        data_dir.load_json_or_default::<AppConfig>(CONFIG_FILE)
    }

    pub fn base_url(&self) -> Result<Url, NoteAppError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| NoteAppError::Config(format!("invalid base_url {:?}: {e}", self.base_url)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(NoteAppError::Config(format!(
                "base_url must be http or https, got {scheme}://"
            ))),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn notification_delay(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }
}
