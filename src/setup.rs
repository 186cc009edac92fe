use std::sync::Arc;

use log::info;

use crate::{
    controller::{
        Capabilities,
        ControllerOptions,
        NoteApp,
    },
    core::{
        http::http_client,
        tasks::TaskManager,
        AppConfig,
        NoteAppError,
    },
    persistence::{
        DataDir,
        FileSessionStore,
    },
    services::{
        HttpLoginService,
        HttpNoteService,
    },
};

/// Wires the HTTP services and the session file into a ready-to-start controller.
pub fn build_app(config: &AppConfig, data_dir: DataDir) -> Result<NoteApp, NoteAppError> {
    let base_url = config.base_url()?;
    let client = http_client(config.request_timeout())?;

    info!("Using note service at {base_url}, data in {}", data_dir.root().display());

    let capabilities = Capabilities {
        notes: Arc::new(HttpNoteService::new(client.clone(), base_url.clone())),
        login: Arc::new(HttpLoginService::new(client, base_url)),
        sessions: Arc::new(FileSessionStore::new(data_dir, config.session_file.clone())),
    };

    Ok(NoteApp::new(capabilities, TaskManager::new()?, ControllerOptions::from(config)))
}
