use clap::Parser;
use game_remover::core::removal::PackageRemover;
use game_remover::domain::model::Access;
use game_remover::utils::error::{ErrorSeverity, GameRemoverError};
use game_remover::utils::logger::{self, LogFormat};
use game_remover::utils::validation::Validate;
use game_remover::{BotCommand, CliConfig, DeleteGameCommand, Invocation, PluginConfig};
use std::sync::Arc;

fn exit_with(e: &GameRemoverError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, cli.verbose);

    if let Err(e) = cli.validate() {
        exit_with(&e);
    }

    tracing::debug!("📁 Loading configuration from: {}", cli.config);
    let config = match PluginConfig::from_file(&cli.config).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let directory = match config.build_directory() {
        Ok(directory) => directory,
        Err(e) => exit_with(&e),
    };
    let help_url = match config.help_url() {
        Ok(url) => url,
        Err(e) => exit_with(&e),
    };

    let account = match cli.bot.as_deref() {
        Some(name) => directory.get(name),
        None => directory.accounts().first(),
    }
    .cloned()
    .ok_or_else(|| anyhow::anyhow!("bot '{}' is not configured", cli.bot.as_deref().unwrap_or_default()))?;

    let access = if config.is_owner(cli.caller) {
        Access::Owner
    } else {
        account.access_for(cli.caller)
    };
    tracing::debug!("🤖 Invoking on {} with {} access", account.name, access);

    let invocation = Invocation {
        account,
        access,
        steam_id: cli.caller,
    };
    let command = DeleteGameCommand::new(PackageRemover::new(help_url), Arc::new(directory));

    match command.on_bot_command(&invocation, &cli.command).await {
        Some(response) => println!("{}", response),
        None => tracing::info!("🔇 No response for '{}'", cli.command.join(" ")),
    }

    Ok(())
}
