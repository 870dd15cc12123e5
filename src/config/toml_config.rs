use crate::adapters::directory::ALL_BOTS;
use crate::adapters::{StaticDirectory, SteamWebSession};
use crate::core::removal::STEAM_HELP_URL;
use crate::domain::model::{Access, Account};
use crate::utils::error::{GameRemoverError, Result};
use crate::utils::validation::{
    validate_account_name, validate_non_empty_string, validate_positive_number, validate_steam_id,
    validate_steam_ids, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default)]
    pub plugin: PluginSettings,
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginSettings {
    pub help_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub owners: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub name: String,
    /// Raw `Cookie` header of a logged-in browser session.
    pub cookies: String,
    pub user_agent: Option<String>,
    /// Steam ID (as string key) -> access tier.
    #[serde(default)]
    pub permissions: HashMap<String, Access>,
}

impl PluginConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GameRemoverError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GameRemoverError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MAIN_STEAM_COOKIES})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn help_url(&self) -> Result<Url> {
        let raw = self.plugin.help_url.as_deref().unwrap_or(STEAM_HELP_URL);
        Ok(Url::parse(raw)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.plugin.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn is_owner(&self, steam_id: u64) -> bool {
        steam_id != 0 && self.plugin.owners.contains(&steam_id)
    }

    /// 建立每個帳號的 session，owner 在所有帳號上都有 Owner 權限
    pub fn build_accounts(&self) -> Result<Vec<Account>> {
        let timeout = self.timeout();

        self.accounts
            .iter()
            .map(|account| -> Result<Account> {
                let session = SteamWebSession::new(
                    &account.cookies,
                    account.user_agent.as_deref(),
                    timeout,
                )?;
                let mut built = Account::new(account.name.clone(), Arc::new(session));

                for (steam_id, access) in &account.permissions {
                    let field = format!("accounts.{}.permissions", account.name);
                    built = built.with_permission(validate_steam_id(&field, steam_id)?, *access);
                }
                for owner in &self.plugin.owners {
                    built = built.with_permission(*owner, Access::Owner);
                }
                Ok(built)
            })
            .collect()
    }

    pub fn build_directory(&self) -> Result<StaticDirectory> {
        Ok(StaticDirectory::new(self.build_accounts()?))
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(help_url) = &self.plugin.help_url {
            validate_url("plugin.help_url", help_url)?;
        }

        if let Some(timeout) = self.plugin.timeout_seconds {
            validate_positive_number("plugin.timeout_seconds", timeout, 1)?;
        }

        validate_steam_ids("plugin.owners", &self.plugin.owners)?;

        if self.accounts.is_empty() {
            return Err(GameRemoverError::MissingConfigError {
                field: "accounts".to_string(),
            });
        }

        let mut names = HashSet::new();
        for account in &self.accounts {
            validate_account_name("accounts.name", &account.name, ALL_BOTS)?;

            if !names.insert(account.name.to_lowercase()) {
                return Err(GameRemoverError::InvalidConfigValueError {
                    field: "accounts.name".to_string(),
                    value: account.name.clone(),
                    reason: "Duplicate account name".to_string(),
                });
            }

            validate_non_empty_string(&format!("accounts.{}.cookies", account.name), &account.cookies)?;

            for steam_id in account.permissions.keys() {
                validate_steam_id(&format!("accounts.{}.permissions", account.name), steam_id)?;
            }
        }

        Ok(())
    }
}

impl Validate for PluginConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
