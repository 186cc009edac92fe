pub mod session_store;

use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use log::{
    debug,
    warn,
};
use serde::{
    Deserialize,
    Serialize,
};

pub use session_store::{
    FileSessionStore,
    MemorySessionStore,
    SessionStore,
};

use crate::core::NoteAppError;

const APP_NAME: &str = "noteapp";

/// Directory holding the app's JSON files (config, saved session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Per-user data directory, or the working directory if the platform has none.
    pub fn default_location() -> Self {
        match dirs::data_local_dir() {
            Some(data_dir) => Self::new(data_dir.join(APP_NAME)),
            None => Self::new("."),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    pub fn save_json<T: Serialize>(&self, data: &T, filename: &str) -> Result<(), NoteAppError> {
        fs::create_dir_all(&self.root)?;
        let file_path = self.file_path(filename);
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&file_path, json)?;
        debug!("Data saved to: {}", file_path.display());
        Ok(())
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load_json<T: for<'de> Deserialize<'de>>(
        &self,
        filename: &str,
    ) -> Result<Option<T>, NoteAppError> {
        let file_path = self.file_path(filename);

        if !file_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&file_path)?;
        let data: T = serde_json::from_str(&json)?;
        debug!("Data loaded from: {}", file_path.display());
        Ok(Some(data))
    }

    pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(&self, filename: &str) -> T {
        match self.load_json::<T>(filename) {
            Ok(data) => data.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to load {}: {}. Using defaults.", filename, e);
                T::default()
            }
        }
    }

    pub fn delete_file(&self, filename: &str) -> Result<(), NoteAppError> {
        let file_path = self.file_path(filename);
        if file_path.exists() {
            fs::remove_file(&file_path)?;
            debug!("Deleted: {}", file_path.display());
        }
        Ok(())
    }
}
