use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) server: Option<String>,
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    #[serde(default)]
    pub(crate) session_cookie: Option<String>,
    #[serde(default)]
    pub(crate) status_path: Option<String>,
    #[serde(default)]
    pub(crate) poll_interval_ms: Option<u64>,
    #[serde(default)]
    pub(crate) initial_delay_ms: Option<u64>,
    #[serde(default)]
    pub(crate) reload_delay_ms: Option<u64>,
    #[serde(default)]
    pub(crate) request_timeout_ms: Option<u64>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
}

impl Config {
    /// Load the first readable config and report where it came from
    pub(crate) fn load() -> (Self, Option<PathBuf>) {
        Self::load_first(&Self::get_config_paths())
    }

    // Try config locations in order of priority
    fn load_first(paths: &[PathBuf]) -> (Self, Option<PathBuf>) {
        for path in paths {
            if let Some(config) = Self::load_from(path) {
                return (config, Some(path.clone()));
            }
        }
        (Self::default(), None)
    }

    fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let content = fs::read_to_string(path).ok()?;
        match toml::from_str::<Config>(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/scanwatch/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("scanwatch").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support, Windows AppData)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("scanwatch").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.scanwatch.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".scanwatch.toml"));
        }

        paths
    }
}
