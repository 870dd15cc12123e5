use crate::domain::model::Account;
use crate::domain::ports::AccountDirectory;
use regex::Regex;

/// Keyword that selects every configured bot.
pub const ALL_BOTS: &str = "ASF";

const REGEX_PREFIX: &str = "r!";
const RANGE_SEPARATOR: &str = "..";

/// Fixed list of accounts, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    accounts: Vec<Account>,
}

impl StaticDirectory {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Exact (case-insensitive) name lookup.
    pub fn get(&self, name: &str) -> Option<&Account> {
        self.position(name).map(|i| &self.accounts[i])
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.accounts
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))
    }

    fn match_token(&self, token: &str) -> Vec<&Account> {
        if token.eq_ignore_ascii_case(ALL_BOTS) {
            return self.accounts.iter().collect();
        }

        if let Some(pattern) = token.strip_prefix(REGEX_PREFIX) {
            return match Regex::new(pattern) {
                Ok(re) => self.accounts.iter().filter(|a| re.is_match(&a.name)).collect(),
                Err(e) => {
                    tracing::warn!("🔍 Invalid bot pattern '{}': {}", pattern, e);
                    Vec::new()
                }
            };
        }

        if let Some((first, last)) = token.split_once(RANGE_SEPARATOR) {
            if let (Some(start), Some(end)) = (self.position(first), self.position(last)) {
                if start <= end {
                    return self.accounts[start..=end].iter().collect();
                }
                return Vec::new();
            }
        }

        self.get(token).into_iter().collect()
    }
}

impl AccountDirectory for StaticDirectory {
    fn resolve(&self, selector: &str) -> Vec<Account> {
        let mut selected: Vec<Account> = Vec::new();

        for token in selector.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            for account in self.match_token(token) {
                if !selected.iter().any(|s| s.name == account.name) {
                    selected.push(account.clone());
                }
            }
        }

        selected
    }
}
