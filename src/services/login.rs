use async_trait::async_trait;
use log::debug;
use reqwest::{
    Client,
    StatusCode,
    Url,
};

use crate::core::{
    http::{
        endpoint,
        ensure_success,
    },
    Credentials,
    NoteAppError,
    Session,
};

#[async_trait]
pub trait LoginService: Send + Sync {
    /// `Auth` when the service rejects the credentials.
    async fn login(&self, credentials: &Credentials) -> Result<Session, NoteAppError>;
}

pub struct HttpLoginService {
    client: Client,
    base_url: Url,
}

impl HttpLoginService {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }
}

pub(crate) fn credentials_rejected(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

#[async_trait]
impl LoginService for HttpLoginService {
    async fn login(&self, credentials: &Credentials) -> Result<Session, NoteAppError> {
        let url = endpoint(&self.base_url, &["login"])?;
        debug!("POST {url} as {}", credentials.username);

        let resp = self.client.post(url).json(credentials).send().await?;

        if credentials_rejected(resp.status()) {
            return Err(NoteAppError::Auth);
        }

        Ok(ensure_success(resp)?.json::<Session>().await?)
    }
}
