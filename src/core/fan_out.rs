use crate::core::aggregator::{remove_from_account, REQUIRED_ACCESS};
use crate::core::removal::PackageRemover;
use crate::domain::model::{
    format_bot_response, format_static_response, Access, Account, AggregateResponse,
};
use crate::domain::ports::AccountDirectory;
use std::sync::Arc;

/// Access the caller holds on `account` when acting through another bot.
///
/// Owners keep owner access everywhere. Everyone else gets exactly what the
/// target account grants them. A zero Steam ID means an internal caller.
pub fn proxy_access(account: &Account, provided: Access, steam_id: u64) -> Access {
    if provided >= Access::Owner || steam_id == 0 {
        provided
    } else {
        account.access_for(steam_id)
    }
}

/// Runs the per-account removal on every account matched by `selector`,
/// one task per account, and joins the lines in resolution order.
pub async fn remove_from_selected(
    remover: Arc<PackageRemover>,
    directory: &dyn AccountDirectory,
    selector: &str,
    steam_id: u64,
    access: Access,
    app_ids_text: &str,
) -> Option<String> {
    let accounts = directory.resolve(selector);
    if accounts.is_empty() {
        tracing::info!("🔍 No bot matched '{}'", selector);
        return (access >= Access::Owner)
            .then(|| format_static_response(&format!("Couldn't find any bot named {}!", selector)));
    }

    tracing::debug!("🔍 '{}' matched {} bot(s)", selector, accounts.len());

    let mut tasks = Vec::with_capacity(accounts.len());
    for account in accounts {
        let account_access = proxy_access(&account, access, steam_id);
        let remover = Arc::clone(&remover);
        let app_ids_text = app_ids_text.to_string();
        let name = account.name.clone();

        let handle = tokio::spawn(async move {
            remove_from_account(&remover, &account, account_access, &app_ids_text).await
        });
        tasks.push((name, account_access, handle));
    }

    let mut response = AggregateResponse::new();
    for (name, account_access, handle) in tasks {
        match handle.await {
            Ok(line) => response.push(line),
            Err(e) => {
                tracing::error!("❌ {}: removal task failed: {}", name, e);
                // 沒有權限的呼叫者不應得知帳號存在
                if account_access >= REQUIRED_ACCESS {
                    response.push(Some(format_bot_response(&name, "Failed! Removal task crashed.")));
                }
            }
        }
    }

    response.into_response()
}
