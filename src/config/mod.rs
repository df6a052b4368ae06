//! Application configuration.
//!
//! Loaded once at startup from a TOML file. A missing file means
//! defaults for everything.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, DispatchConfig, DispatchMode, ImageConfig, RepositoryConfig};
