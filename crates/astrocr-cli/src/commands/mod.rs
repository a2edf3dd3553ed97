//! Subcommands and the configuration they share.

pub mod check;
pub mod config;
pub mod run;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use astrocr_core::AstrocrConfig;

/// Flags accepted by every subcommand.
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub root: Option<PathBuf>,
}

impl GlobalOpts {
    /// Config file in effect: `--config`, else the per-user default.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    /// Load the configuration and apply `--root`.
    ///
    /// An explicit `--config` must exist; the per-user default is optional.
    pub fn load_config(&self) -> anyhow::Result<AstrocrConfig> {
        let config = match &self.config {
            Some(path) => read_config(path)?,
            None => {
                let path = default_config_path();
                if path.exists() {
                    read_config(&path)?
                } else {
                    AstrocrConfig::default()
                }
            }
        };

        Ok(match &self.root {
            Some(root) => config.with_root(root),
            None => config,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("astrocr")
        .join("config.json")
}

fn read_config(path: &Path) -> anyhow::Result<AstrocrConfig> {
    debug!("Loading config from {}", path.display());
    AstrocrConfig::from_file(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))
}
