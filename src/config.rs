//! Configuration for hosts embedding deferlog

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::logging::Facade;

/// Facade settings a host can keep in a TOML file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Initial state of the debug flag (default: false)
    #[serde(default)]
    pub debug: bool,

    /// Filter directive for the host's tracing subscriber (default: "info")
    ///
    /// The facade itself does not filter; this is read by whoever builds the
    /// backend.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            filter: default_filter(),
        }
    }
}

impl Config {
    /// Load configuration from file, or return default if not found
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Push these settings into `facade`
    pub fn apply(&self, facade: &Facade) {
        // Only touch the flag when it changes so the warning is not repeated
        if facade.is_debug_enabled() != self.debug {
            facade.set_debug_enabled(self.debug);
        }
    }
}
