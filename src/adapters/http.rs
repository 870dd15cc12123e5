use crate::domain::ports::WebSession;
use crate::utils::error::{GameRemoverError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, REFERER};
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

const DEFAULT_USER_AGENT: &str = concat!("game-remover/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed session that replays an existing Steam login cookie.
#[derive(Debug, Clone)]
pub struct SteamWebSession {
    client: Client,
    session_id: Option<String>,
}

impl SteamWebSession {
    pub fn new(cookies: &str, user_agent: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut cookie = HeaderValue::from_str(cookies.trim()).map_err(|e| {
            GameRemoverError::InvalidConfigValueError {
                field: "accounts.cookies".to_string(),
                value: "<redacted>".to_string(),
                reason: e.to_string(),
            }
        })?;
        cookie.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            session_id: session_id_from_cookies(cookies),
        })
    }

    fn check_status(url: &Url, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            tracing::debug!("🌐 {} answered {}", url, status);
            Err(GameRemoverError::HttpStatusError {
                status: status.as_u16(),
                url: url.to_string(),
            })
        }
    }
}

/// Value of the `sessionid` cookie, echoed back in POST forms like the browser does.
pub fn session_id_from_cookies(cookies: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == "sessionid")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[async_trait]
impl WebSession for SteamWebSession {
    async fn get_html(&self, url: &Url) -> Result<String> {
        tracing::debug!("🌐 GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let response = Self::check_status(url, response)?;
        Ok(response.text().await?)
    }

    async fn post_form_json(
        &self,
        url: &Url,
        form: &[(&str, String)],
        referer: &Url,
    ) -> Result<serde_json::Value> {
        let mut fields: Vec<(&str, &str)> = form.iter().map(|(k, v)| (*k, v.as_str())).collect();
        if let Some(session_id) = &self.session_id {
            fields.push(("sessionid", session_id.as_str()));
        }

        tracing::debug!("🌐 POST {} ({} field(s))", url, fields.len());
        let response = self
            .client
            .post(url.clone())
            .header(REFERER, referer.as_str())
            .form(&fields)
            .send()
            .await?;
        let response = Self::check_status(url, response)?;
        Ok(response.json::<serde_json::Value>().await?)
    }
}
