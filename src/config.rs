use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::render::OutputFormat;

pub const CONFIG_FILE_NAME: &str = ".negcovrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Catalog file, relative to the directory holding the config file.
    #[serde(default = "default_catalog")]
    pub catalog: String,
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub format: OutputFormat,
    /// Glob patterns skipped when scanning directories for state files.
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
}

fn default_catalog() -> String {
    "./catalog.json".to_string()
}

fn default_platforms() -> Vec<String> {
    vec!["aws".to_string()]
}

fn default_ignores() -> Vec<String> {
    vec!["**/.terraform/**".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            platforms: default_platforms(),
            format: OutputFormat::default(),
            ignores: default_ignores(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if an ignore pattern is not a valid glob or no
    /// platform is configured.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.platforms.is_empty() {
            bail!("'platforms' must name at least one platform");
        }
        if let Some(blank) = self.platforms.iter().find(|p| p.trim().is_empty()) {
            bail!("Invalid platform name in 'platforms': \"{}\"", blank);
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config resolve against: the config
    /// file's directory, or the start directory when using defaults.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

impl ConfigLoadResult {
    pub fn catalog_path(&self) -> PathBuf {
        self.base_dir.join(&self.config.catalog)
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
