//! Configuration file loading for tripscout
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TRIPSCOUT_<SECTION>__<KEY>` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./tripscout.toml` or `./.tripscout.toml`
//! 4. Global: `$XDG_CONFIG_HOME/tripscout/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileConfig, FileGeminiConfig, FileOutputConfig, FilePhotonConfig,
    FileReplConfig, FileSearchConfig, FileSessionsConfig, GEMINI_API_KEY_ENV, OUTPUT_FORMATS,
    Severity,
};
pub use loader::ConfigLoader;
