//! HTTP Content API
//!
//! `ContentApi` over reqwest. On wasm32 reqwest drives the browser's fetch,
//! so session cookies ride along via `credentials: include`; natively a
//! cookie store plays that role.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use super::{
    parse_error_body, AuthStatus, BatchDeleteBody, ChecklistItemPatch, ChecklistUpdateBody,
    ContentApi, Message, NewChecklistBody, NewItemBody, NewNoteBody, NoteUpdateBody, PinBody,
};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, ConfigError};
use crate::lan::LanStatus;
use crate::models::{Checklist, ChecklistItem, Content, ContentKey, Note};

#[derive(Debug, Clone)]
pub struct HttpContentApi {
    client: Client,
    base_url: Url,
}

impl HttpContentApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: build_client()?,
            base_url: config.parsed_base_url()?,
        })
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Network(format!("invalid endpoint {}: {}", path, e)))
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await.map_err(|e| {
            log::error!("API request error: {}", e);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = parse_error_body(status.as_u16(), &body);
        log::error!("API request error: {} ({})", err, status);
        Err(err)
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        response.json::<T>().await.map_err(|e| {
            log::error!("API response decode error: {}", e);
            ApiError::Decode(e.to_string())
        })
    }

    /// 204 and any acknowledgement body are both success
    async fn empty(&self, request: RequestBuilder) -> ApiResult<()> {
        self.send(request).await.map(|_| ())
    }

    fn get(&self, path: &str) -> ApiResult<RequestBuilder> {
        Ok(self.client.get(self.endpoint(path)?))
    }

    fn post(&self, path: &str) -> ApiResult<RequestBuilder> {
        Ok(self.client.post(self.endpoint(path)?))
    }

    fn put(&self, path: &str) -> ApiResult<RequestBuilder> {
        Ok(self.client.put(self.endpoint(path)?))
    }

    fn delete(&self, path: &str) -> ApiResult<RequestBuilder> {
        Ok(self.client.delete(self.endpoint(path)?))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client() -> Result<Client, ConfigError> {
    Client::builder()
        .cookie_store(true)
        .build()
        .map_err(|e| ConfigError::Client(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn build_client() -> Result<Client, ConfigError> {
    Ok(Client::new())
}

/// Marks a request as carrying the hidden-content session
#[cfg(target_arch = "wasm32")]
fn credentialed(request: RequestBuilder) -> RequestBuilder {
    request.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn credentialed(request: RequestBuilder) -> RequestBuilder {
    request
}

#[async_trait(?Send)]
impl ContentApi for HttpContentApi {
    async fn list_content(&self) -> ApiResult<Vec<Content>> {
        self.json(self.get("api/content")?).await
    }

    async fn list_hidden_content(&self) -> ApiResult<Vec<Content>> {
        self.json(credentialed(self.get("api/content/hidden")?)).await
    }

    async fn authenticate(&self, pin: &str) -> ApiResult<Message> {
        let request = credentialed(self.post("api/auth")?).json(&PinBody { pin });
        self.json(request).await
    }

    async fn auth_status(&self) -> ApiResult<AuthStatus> {
        self.json(credentialed(self.get("api/auth/status")?)).await
    }

    async fn logout(&self) -> ApiResult<Message> {
        self.json(credentialed(self.post("api/logout")?)).await
    }

    async fn create_note(&self, title: &str, content: &str) -> ApiResult<Note> {
        let request = self.post("api/notes")?.json(&NewNoteBody { title, content });
        self.json(request).await
    }

    async fn create_checklist(&self, title: &str) -> ApiResult<Checklist> {
        let request = self.post("api/checklists")?.json(&NewChecklistBody { title });
        self.json(request).await
    }

    async fn update_note(&self, note: &Note) -> ApiResult<Note> {
        let request = credentialed(self.put(&format!("api/notes/{}", note.id))?)
            .json(&NoteUpdateBody::from(note));
        self.json(request).await
    }

    async fn update_checklist(&self, checklist: &Checklist) -> ApiResult<Checklist> {
        let request = credentialed(self.put(&format!("api/checklists/{}", checklist.id))?)
            .json(&ChecklistUpdateBody::from(checklist));
        self.json(request).await
    }

    async fn delete_note(&self, id: i64) -> ApiResult<()> {
        self.empty(credentialed(self.delete(&format!("api/notes/{}", id))?))
            .await
    }

    async fn delete_checklist(&self, id: i64) -> ApiResult<()> {
        self.empty(credentialed(self.delete(&format!("api/checklists/{}", id))?))
            .await
    }

    async fn add_checklist_item(
        &self,
        checklist_id: i64,
        content: &str,
    ) -> ApiResult<ChecklistItem> {
        let request = self
            .post(&format!("api/checklists/{}/items", checklist_id))?
            .json(&NewItemBody { content });
        self.json(request).await
    }

    async fn update_checklist_item(
        &self,
        item_id: i64,
        patch: &ChecklistItemPatch,
    ) -> ApiResult<ChecklistItem> {
        let request = self
            .put(&format!("api/checklists/items/{}", item_id))?
            .json(patch);
        self.json(request).await
    }

    async fn delete_checklist_item(&self, item_id: i64) -> ApiResult<()> {
        self.empty(self.delete(&format!("api/checklists/items/{}", item_id))?)
            .await
    }

    async fn delete_batch(&self, keys: &[ContentKey]) -> ApiResult<Message> {
        let request = credentialed(self.delete("api/content/batch")?)
            .json(&BatchDeleteBody { items: keys });
        self.json(request).await
    }

    async fn lan_status(&self) -> ApiResult<LanStatus> {
        self.json(self.get("api/system/lan/status")?).await
    }

    async fn enable_lan(&self) -> ApiResult<()> {
        self.empty(self.post("api/system/lan/enable")?).await
    }

    async fn disable_lan(&self) -> ApiResult<()> {
        self.empty(self.post("api/system/lan/disable")?).await
    }
}
