pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::PluginConfig;

pub use adapters::{StaticDirectory, SteamWebSession};
pub use crate::core::{command::DeleteGameCommand, removal::PackageRemover};
pub use domain::model::{Access, Account, RemovalOutcome};
pub use domain::ports::{AccountDirectory, BotCommand, Invocation, WebSession};
pub use utils::error::{GameRemoverError, Result};
