use crate::domain::ports::WebSession;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Steam application ID, always non-zero once parsed.
pub type AppId = u32;

/// Steam package (sub) ID discovered on the help-wizard page.
pub type PackageId = u32;

/// Ordered, duplicate-free list of app IDs in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdSet {
    ids: Vec<AppId>,
}

impl AppIdSet {
    pub(crate) fn from_unique(ids: Vec<AppId>) -> Self {
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = AppId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[AppId] {
        &self.ids
    }
}

/// Authorization tier, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    #[default]
    None,
    FamilySharing,
    Operator,
    Master,
    Owner,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Access::None => "none",
            Access::FamilySharing => "family_sharing",
            Access::Operator => "operator",
            Access::Master => "master",
            Access::Owner => "owner",
        };
        f.write_str(name)
    }
}

/// 單一 (帳號, appid) 的移除結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    Success,
    Failure,
    ValidationError(String),
    LookupError(String),
}

/// Why an account stopped before processing every app ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountAbort {
    InvalidInput { fragment: String },
    Lookup { app_id: AppId, reason: String },
    Validation { app_id: AppId, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub aborted: Option<AccountAbort>,
}

impl AccountSummary {
    pub fn stopped(abort: AccountAbort) -> Self {
        Self {
            aborted: Some(abort),
            ..Self::default()
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.aborted.is_none() && self.succeeded == self.attempted
    }

    /// Response text without the account prefix.
    pub fn message(&self) -> String {
        match &self.aborted {
            Some(AccountAbort::InvalidInput { fragment }) => format!("'{}' is invalid!", fragment),
            Some(AccountAbort::Lookup { app_id, reason }) => {
                format!("Lookup failed for app {}: {}", app_id, reason)
            }
            Some(AccountAbort::Validation { app_id, reason }) => {
                format!("Validation failed for app {}: {}", app_id, reason)
            }
            None if self.all_succeeded() => "Success!".to_string(),
            None => format!(
                "Failed! {} of {} succeeded.",
                self.succeeded, self.attempted
            ),
        }
    }
}

/// Per-account lines in resolution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResponse {
    lines: Vec<String>,
}

impl AggregateResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty lines are dropped so silent accounts contribute nothing.
    pub fn push(&mut self, line: Option<String>) {
        if let Some(line) = line.filter(|l| !l.is_empty()) {
            self.lines.push(line);
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_response(self) -> Option<String> {
        if self.lines.is_empty() {
            None
        } else {
            Some(self.lines.join("\n"))
        }
    }
}

/// A managed bot account: its name, web session and delegated access grants.
#[derive(Clone)]
pub struct Account {
    pub name: String,
    pub session: Arc<dyn WebSession>,
    pub permissions: HashMap<u64, Access>,
}

impl Account {
    pub fn new(name: impl Into<String>, session: Arc<dyn WebSession>) -> Self {
        Self {
            name: name.into(),
            session,
            permissions: HashMap::new(),
        }
    }

    pub fn with_permission(mut self, steam_id: u64, access: Access) -> Self {
        self.permissions.insert(steam_id, access);
        self
    }

    /// Access this account grants to `steam_id`.
    pub fn access_for(&self, steam_id: u64) -> Access {
        self.permissions.get(&steam_id).copied().unwrap_or_default()
    }

    pub fn format_response(&self, message: &str) -> String {
        format_bot_response(&self.name, message)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("permissions", &self.permissions)
            .finish_non_exhaustive()
    }
}

pub fn format_bot_response(bot_name: &str, message: &str) -> String {
    format!("<{}> {}", bot_name, message)
}

pub fn format_static_response(message: &str) -> String {
    format!("<ASF> {}", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_ordering() {
        assert!(Access::None < Access::FamilySharing);
        assert!(Access::Operator < Access::Master);
        assert!(Access::Master < Access::Owner);
    }

    #[test]
    fn test_summary_messages() {
        let all = AccountSummary {
            attempted: 3,
            succeeded: 3,
            aborted: None,
        };
        assert_eq!(all.message(), "Success!");

        let partial = AccountSummary {
            attempted: 3,
            succeeded: 1,
            aborted: None,
        };
        assert_eq!(partial.message(), "Failed! 1 of 3 succeeded.");

        let none = AccountSummary {
            attempted: 2,
            succeeded: 0,
            aborted: None,
        };
        assert_eq!(none.message(), "Failed! 0 of 2 succeeded.");

        let lookup = AccountSummary::stopped(AccountAbort::Lookup {
            app_id: 440,
            reason: "page unavailable".to_string(),
        });
        assert_eq!(lookup.message(), "Lookup failed for app 440: page unavailable");
    }

    #[test]
    fn test_aggregate_response_skips_silent_accounts() {
        let mut response = AggregateResponse::new();
        assert_eq!(response.clone().into_response(), None);

        response.push(Some("<a> Success!".to_string()));
        response.push(None);
        response.push(Some(String::new()));
        response.push(Some("<c> Failed! 1 of 2 succeeded.".to_string()));

        assert_eq!(response.lines().len(), 2);
        assert_eq!(
            response.into_response().as_deref(),
            Some("<a> Success!\n<c> Failed! 1 of 2 succeeded.")
        );
    }
}
