// Adapters layer: concrete implementations of the domain ports.

pub mod directory;
pub mod http;

pub use directory::StaticDirectory;
pub use http::SteamWebSession;
