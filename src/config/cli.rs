use crate::utils::error::{GameRemoverError, Result};
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "game-remover")]
#[command(about = "Ask Steam support to remove owned games from your bot accounts")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "game-remover.toml")]
    pub config: String,

    /// Bot the command is invoked on (defaults to the first configured account)
    #[arg(short, long)]
    pub bot: Option<String>,

    /// Steam ID of the user issuing the command
    #[arg(long)]
    pub caller: u64,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Command words, e.g. `DELETEGAME main,alt 440,730`
    #[arg(required = true, trailing_var_arg = true)]
    pub command: Vec<String>,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.caller == 0 {
            return Err(GameRemoverError::InvalidConfigValueError {
                field: "caller".to_string(),
                value: "0".to_string(),
                reason: "Caller Steam ID must be non-zero".to_string(),
            });
        }
        if self.command.is_empty() {
            return Err(GameRemoverError::MissingConfigError {
                field: "command".to_string(),
            });
        }
        Ok(())
    }
}
