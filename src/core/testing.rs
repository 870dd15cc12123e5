//! Scripted in-memory web session for unit tests.

use crate::domain::model::{AppId, PackageId};
use crate::domain::ports::WebSession;
use crate::utils::error::{GameRemoverError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedRequest {
    Get {
        url: String,
    },
    Post {
        url: String,
        form: Vec<(String, String)>,
        referer: String,
    },
}

pub fn package_page(package_id: &str) -> String {
    format!(
        r#"<html><body><form id="remove_form">
<input type="hidden" name="sessionid" value="abc">
<input type="hidden" id="packageid" name="packageid" value="{}">
</form></body></html>"#,
        package_id
    )
}

#[derive(Clone, Default)]
pub struct MockSession {
    /// `None` simulates an unreachable page.
    pages: HashMap<AppId, Option<String>>,
    removals: HashMap<PackageId, serde_json::Value>,
    panic_on_get: bool,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, app_id: AppId, html: String) -> Self {
        self.pages.insert(app_id, Some(html));
        self
    }

    pub fn with_unreachable_page(mut self, app_id: AppId) -> Self {
        self.pages.insert(app_id, None);
        self
    }

    pub fn with_removal(mut self, package_id: PackageId, reply: serde_json::Value) -> Self {
        self.removals.insert(package_id, reply);
        self
    }

    pub fn panicking(mut self) -> Self {
        self.panic_on_get = true;
        self
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn post_count(&self) -> usize {
        self.requests
            .lock()
            .await
            .iter()
            .filter(|r| matches!(r, RecordedRequest::Post { .. }))
            .count()
    }

    fn not_found(url: &Url) -> GameRemoverError {
        GameRemoverError::HttpStatusError {
            status: 500,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl WebSession for MockSession {
    async fn get_html(&self, url: &Url) -> Result<String> {
        self.requests.lock().await.push(RecordedRequest::Get {
            url: url.to_string(),
        });
        if self.panic_on_get {
            panic!("session crashed");
        }

        let app_id = url
            .query_pairs()
            .find(|(k, _)| k == "appid")
            .and_then(|(_, v)| v.parse::<AppId>().ok())
            .ok_or_else(|| Self::not_found(url))?;

        match self.pages.get(&app_id) {
            Some(Some(html)) => Ok(html.clone()),
            _ => Err(Self::not_found(url)),
        }
    }

    async fn post_form_json(
        &self,
        url: &Url,
        form: &[(&str, String)],
        referer: &Url,
    ) -> Result<serde_json::Value> {
        self.requests.lock().await.push(RecordedRequest::Post {
            url: url.to_string(),
            form: form
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            referer: referer.to_string(),
        });

        form.iter()
            .find(|(k, _)| *k == "packageid")
            .and_then(|(_, v)| v.parse::<PackageId>().ok())
            .and_then(|id| self.removals.get(&id).cloned())
            .ok_or_else(|| Self::not_found(url))
    }
}
