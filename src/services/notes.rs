use std::sync::{
    PoisonError,
    RwLock,
};

use async_trait::async_trait;
use log::debug;
use reqwest::{
    Client,
    RequestBuilder,
    StatusCode,
    Url,
};

use crate::core::{
    http::{
        endpoint,
        ensure_success,
        rejection_reason,
    },
    Note,
    NoteAppError,
    NoteDraft,
    NoteId,
};

/// Remote note collection. Holds one bearer token slot shared by every call.
#[async_trait]
pub trait NoteService: Send + Sync {
    fn set_token(&self, token: &str);

    fn clear_token(&self);

    async fn list_all(&self) -> Result<Vec<Note>, NoteAppError>;

    async fn create(&self, draft: &NoteDraft) -> Result<Note, NoteAppError>;

    /// Replaces the whole record. `NotFound` when the id is gone server-side.
    async fn update(&self, id: &NoteId, note: &Note) -> Result<Note, NoteAppError>;
}

pub struct HttpNoteService {
    client: Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

impl HttpNoteService {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url, token: RwLock::new(None) }
    }

    pub fn has_token(&self) -> bool {
        self.token.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.read().unwrap_or_else(PoisonError::into_inner).as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

pub(crate) fn create_rejected(status: StatusCode) -> bool {
    matches!(status, StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY)
}

pub(crate) fn update_target_gone(status: StatusCode) -> bool {
    matches!(status, StatusCode::NOT_FOUND | StatusCode::GONE)
}

#[async_trait]
impl NoteService for HttpNoteService {
    fn set_token(&self, token: &str) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    fn clear_token(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    async fn list_all(&self) -> Result<Vec<Note>, NoteAppError> {
        let url = endpoint(&self.base_url, &["notes"])?;
        debug!("GET {url}");

        let resp = self.authorized(self.client.get(url)).send().await?;
        let notes = ensure_success(resp)?.json::<Vec<Note>>().await?;

        debug!("Fetched {} notes", notes.len());
        Ok(notes)
    }

    async fn create(&self, draft: &NoteDraft) -> Result<Note, NoteAppError> {
        let url = endpoint(&self.base_url, &["notes"])?;
        debug!("POST {url}");

        let resp = self.authorized(self.client.post(url)).json(draft).send().await?;

        if create_rejected(resp.status()) {
            return Err(NoteAppError::Validation(rejection_reason(resp).await));
        }

        Ok(ensure_success(resp)?.json::<Note>().await?)
    }

    async fn update(&self, id: &NoteId, note: &Note) -> Result<Note, NoteAppError> {
        let id_segment = id.to_string();
        let url = endpoint(&self.base_url, &["notes", &id_segment])?;
        debug!("PUT {url}");

        let resp = self.authorized(self.client.put(url)).json(note).send().await?;

        if update_target_gone(resp.status()) {
            return Err(NoteAppError::NotFound(id.clone()));
        }

        Ok(ensure_success(resp)?.json::<Note>().await?)
    }
}
