//! Loading of the optional `soj.toml` build configuration.
//!
//! The configuration only tunes where files are read and written and how the
//! vendor tools are launched; everything about the design itself is derived
//! from the part identifier.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
