use std::{
    future::Future,
    sync::{
        mpsc,
        Arc,
    },
    thread,
    time::Duration,
};

use eframe::egui;
use log::debug;
use tokio::runtime::Runtime;

use super::TaskResult;
use crate::{
    core::{
        Credentials,
        Note,
        NoteAppError,
        NoteDraft,
    },
    services::{
        LoginService,
        NoteService,
    },
};

/// Runs service calls off the UI thread and hands their results back over a channel.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    repaint: Option<egui::Context>,
}

impl TaskManager {
    pub fn new() -> Result<Self, NoteAppError> {
        let runtime = Arc::new(
            Runtime::new()
                .map_err(|e| NoteAppError::Runtime(format!("Failed to start task runtime: {e}")))?,
        );

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender, repaint: None })
    }

    /// Wakes the UI each time a result arrives so it gets applied without user input.
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    /// Blocks until the next result arrives or `timeout` passes.
    pub fn wait_result(&self, timeout: Duration) -> Option<TaskResult> {
        self.receiver.recv_timeout(timeout).ok()
    }

    fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = TaskResult>,
    {
        let sender = self.sender.clone();
        let runtime = self.runtime.clone();
        let repaint = self.repaint.clone();

        thread::spawn(move || {
            let result = runtime.block_on(task());
            debug!("Task {} finished (ok: {})", result.task_type(), result.is_ok());

            let _ = sender.send(result);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    pub fn fetch_notes(&self, service: Arc<dyn NoteService>, initial: bool) {
        self.spawn(move || async move {
            let result = service.list_all().await;
            TaskResult::NotesLoaded { initial, result }
        });
    }

    pub fn create_note(&self, service: Arc<dyn NoteService>, draft: NoteDraft) {
        self.spawn(move || async move {
            let result = service.create(&draft).await;
            TaskResult::NoteCreated { result }
        });
    }

    pub fn update_note(&self, service: Arc<dyn NoteService>, note: Note) {
        self.spawn(move || async move {
            let result = service.update(&note.id, &note).await;
            TaskResult::NoteUpdated { id: note.id, content: note.content, result }
        });
    }

    pub fn login(&self, service: Arc<dyn LoginService>, credentials: Credentials, attempt: u64) {
        self.spawn(move || async move {
            let result = service.login(&credentials).await;
            TaskResult::LoggedIn { attempt, result }
        });
    }
}
