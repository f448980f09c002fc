//! Configuration loading for conn.
//!
//! This module handles:
//! - The option schema and its compiled-in defaults
//! - key=value config file parsing
//! - Locating the config file and expanding `~/` paths

pub mod parser;
pub mod paths;
pub mod types;

pub use parser::{load_config, load_options, parse_config_str};
pub use paths::{config_path, expand_path};
pub use types::Options;
