use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global configuration loaded from `~/.config/linkcheck/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkcheckConfig {
    /// Directory holding `good_urls.txt` and `bad_urls.txt`, relative to the invocation directory.
    pub output_dir: PathBuf,
    /// Seconds allowed for establishing a connection to a host.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for a whole request (connect + transfer).
    pub timeout_secs: u64,
    /// How many levels of paste pages are expanded. Paste links found below this depth are judged dead.
    #[serde(default = "default_paste_depth")]
    pub paste_depth: u32,
    /// Number of probes in flight at once (1 = strictly sequential).
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_paste_depth() -> u32 {
    1
}

fn default_workers() -> usize {
    1
}

impl Default for LinkcheckConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            connect_timeout_secs: 10,
            timeout_secs: 20,
            paste_depth: default_paste_depth(),
            workers: default_workers(),
        }
    }
}

impl LinkcheckConfig {
    /// Request timeouts as passed to the fetch layer.
    pub fn timeouts(&self) -> crate::fetch::Timeouts {
        crate::fetch::Timeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            total: Duration::from_secs(self.timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("linkcheck")?;
    xdg_dirs
        .place_config_file("config.toml")
        .context("failed to create config dir")
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LinkcheckConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] for an explicit config file path.
pub fn load_or_init_at(path: &Path) -> Result<LinkcheckConfig> {
    if !path.exists() {
        let default_cfg = LinkcheckConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config dir: {}", parent.display()))?;
        }
        fs::write(path, toml)
            .with_context(|| format!("failed to write default config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: LinkcheckConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
