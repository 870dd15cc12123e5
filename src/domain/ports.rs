use crate::domain::model::{Access, Account};
use crate::utils::error::Result;
use async_trait::async_trait;
use url::Url;

/// Cookie-backed web session of one account.
#[async_trait]
pub trait WebSession: Send + Sync {
    /// GET `url` and return the HTML body.
    async fn get_html(&self, url: &Url) -> Result<String>;

    /// POST a urlencoded form with `referer` and decode the JSON reply.
    async fn post_form_json(
        &self,
        url: &Url,
        form: &[(&str, String)],
        referer: &Url,
    ) -> Result<serde_json::Value>;
}

/// Resolves a bot selector to zero or more accounts.
pub trait AccountDirectory: Send + Sync {
    fn resolve(&self, selector: &str) -> Vec<Account>;
}

/// Who invoked a command and on which account.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub account: Account,
    pub access: Access,
    pub steam_id: u64,
}

/// Host-facing command capability. `None` means "not handled / stay silent".
#[async_trait]
pub trait BotCommand: Send + Sync {
    fn name(&self) -> &str;

    async fn on_bot_command(&self, invocation: &Invocation, args: &[String]) -> Option<String>;
}
