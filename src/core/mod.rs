pub mod aggregator;
pub mod command;
pub mod fan_out;
pub mod identifiers;
pub mod removal;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{Access, Account, AppIdSet, RemovalOutcome};
pub use crate::domain::ports::{AccountDirectory, BotCommand, Invocation, WebSession};
pub use crate::utils::error::Result;
