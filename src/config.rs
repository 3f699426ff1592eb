use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::consts::CONFIG_ENV;
use crate::format::FormatSyntax;

/// Host options read from `config.toml`. Command-line flags win.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) syntax: Option<FormatSyntax>,
    #[serde(default)]
    pub(crate) settings_path: Option<PathBuf>,
}

/// The config file that was found, and what parsing it produced.
#[derive(Debug)]
pub(crate) struct ConfigFile {
    pub(crate) path: PathBuf,
    pub(crate) parsed: Result<Config, toml::de::Error>,
}

impl Config {
    pub(crate) fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// First readable config file, in priority order.
    pub(crate) fn find() -> Option<ConfigFile> {
        Self::get_config_paths().into_iter().find_map(|path| {
            let content = fs::read_to_string(&path).ok()?;
            Some(ConfigFile {
                parsed: Self::parse(&content),
                path,
            })
        })
    }

    /// The parsed config, or defaults when none was found or it was invalid.
    pub(crate) fn from_file(file: Option<&ConfigFile>) -> Self {
        file.and_then(|f| f.parsed.as_ref().ok())
            .cloned()
            .unwrap_or_default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        // An explicit location replaces the search entirely
        if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
            return vec![PathBuf::from(explicit)];
        }

        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/timestamper/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("timestamper").join("config.toml"));
        }

        // 2. Platform config dir, e.g. ~/Library/Application Support/timestamper/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("timestamper").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.timestamper.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".timestamper.toml"));
        }

        paths
    }
}
