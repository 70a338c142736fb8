use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_retries() -> u32 {
    3
}

fn default_fragment_retries() -> u32 {
    3
}

/// External engine parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Explicit path to the engine binary. When unset, `yt-dlp` is
    /// discovered on PATH.
    #[serde(default)]
    pub binary: Option<PathBuf>,
    /// Connection retry count handed to the engine per item.
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Retry count for an item's media fragments.
    #[serde(default = "default_fragment_retries")]
    pub fragment_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: None,
            retries: default_retries(),
            fragment_retries: default_fragment_retries(),
        }
    }
}

/// Global configuration loaded from `~/.config/ytbatch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YtbatchConfig {
    /// Ceiling on concurrently running fetch workers.
    pub max_workers: usize,
    /// Engine settings; built-in defaults apply when the section is missing.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for YtbatchConfig {
    fn default() -> Self {
        Self {
            max_workers: crate::batch::DEFAULT_MAX_WORKERS,
            engine: EngineConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ytbatch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<YtbatchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = YtbatchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: YtbatchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
