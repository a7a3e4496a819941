//! Configuration discovery and parsing.
//!
//! Configuration lives in `.firmrank.toml`, found by walking up from the
//! working directory. Every section is optional.

mod accessors;
mod core;
mod loader;

pub use accessors::get_config;
pub use core::{EnforcementConfig, FiltersConfig, FirmrankConfig, OutputConfig, SnapshotConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
