use crate::core::identifiers::parse_app_ids;
use crate::core::removal::PackageRemover;
use crate::domain::model::{Access, Account, AccountAbort, AccountSummary, AppIdSet, RemovalOutcome};
use crate::domain::ports::WebSession;
use crate::utils::error::GameRemoverError;

/// Minimum access needed to remove games from an account.
pub const REQUIRED_ACCESS: Access = Access::Master;

/// Processes `app_ids` one after another on a single session.
///
/// A lookup or validation error stops the loop; plain failures are counted.
pub async fn summarize_account(
    remover: &PackageRemover,
    session: &dyn WebSession,
    app_ids: &AppIdSet,
) -> AccountSummary {
    let mut summary = AccountSummary::default();

    for app_id in app_ids.iter() {
        match remover.remove(session, app_id).await {
            RemovalOutcome::Success => {
                summary.attempted += 1;
                summary.succeeded += 1;
            }
            RemovalOutcome::Failure => summary.attempted += 1,
            RemovalOutcome::LookupError(reason) => {
                return AccountSummary::stopped(AccountAbort::Lookup { app_id, reason });
            }
            RemovalOutcome::ValidationError(reason) => {
                return AccountSummary::stopped(AccountAbort::Validation { app_id, reason });
            }
        }
    }

    summary
}

/// Response line for one account, or `None` when the caller lacks access.
pub async fn remove_from_account(
    remover: &PackageRemover,
    account: &Account,
    access: Access,
    app_ids_text: &str,
) -> Option<String> {
    if access < REQUIRED_ACCESS {
        tracing::debug!("🔒 {}: access {} is below {}", account.name, access, REQUIRED_ACCESS);
        return None;
    }

    let summary = match parse_app_ids(app_ids_text) {
        Ok(app_ids) => {
            tracing::info!("🤖 {}: removing {} app(s)", account.name, app_ids.len());
            summarize_account(remover, account.session.as_ref(), &app_ids).await
        }
        Err(GameRemoverError::InvalidIdentifier { fragment }) => {
            AccountSummary::stopped(AccountAbort::InvalidInput { fragment })
        }
        Err(e) => AccountSummary::stopped(AccountAbort::InvalidInput {
            fragment: e.to_string(),
        }),
    };

    match &summary.aborted {
        Some(abort) => tracing::warn!("🤖 {}: aborted: {:?}", account.name, abort),
        None => tracing::info!(
            "🤖 {}: {} of {} removal(s) succeeded",
            account.name,
            summary.succeeded,
            summary.attempted
        ),
    }

    Some(account.format_response(&summary.message()))
}
