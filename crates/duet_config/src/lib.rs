//! Parsing and validation of `duet.toml` project configuration files.
//!
//! Every section and field is optional; a missing file or an empty one yields
//! [`DuetConfig::default`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, load_config_or_default, CONFIG_FILE};
pub use types::*;
