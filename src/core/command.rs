use crate::core::aggregator::remove_from_account;
use crate::core::fan_out::remove_from_selected;
use crate::core::removal::PackageRemover;
use crate::domain::ports::{AccountDirectory, BotCommand, Invocation};
use async_trait::async_trait;
use std::sync::Arc;

pub const PLUGIN_NAME: &str = "GameRemover";
pub const DELETE_GAME: &str = "DELETEGAME";

/// `DELETEGAME [bots] <appids>` handler.
pub struct DeleteGameCommand {
    remover: Arc<PackageRemover>,
    directory: Arc<dyn AccountDirectory>,
}

impl DeleteGameCommand {
    pub fn new(remover: PackageRemover, directory: Arc<dyn AccountDirectory>) -> Self {
        tracing::info!(
            "🔌 {} {} loaded (help site: {})",
            PLUGIN_NAME,
            env!("CARGO_PKG_VERSION"),
            remover.help_url()
        );
        Self {
            remover: Arc::new(remover),
            directory,
        }
    }
}

#[async_trait]
impl BotCommand for DeleteGameCommand {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    async fn on_bot_command(&self, invocation: &Invocation, args: &[String]) -> Option<String> {
        let command = args.first()?;
        if !command.eq_ignore_ascii_case(DELETE_GAME) {
            return None;
        }

        match args {
            [_, app_ids] => {
                remove_from_account(&self.remover, &invocation.account, invocation.access, app_ids).await
            }
            [_, selector, rest @ ..] if !rest.is_empty() => {
                // DELETEGAME bots 440 730 等同於 DELETEGAME bots 440,730
                let app_ids = rest.join(",");
                remove_from_selected(
                    Arc::clone(&self.remover),
                    self.directory.as_ref(),
                    selector,
                    invocation.steam_id,
                    invocation.access,
                    &app_ids,
                )
                .await
            }
            _ => None,
        }
    }
}
