//! epoch.toml loading and scaffolding

use anyhow::{Context, Result};
use epoch_showcase::ShowcaseConfig;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "epoch.toml";

/// Resolve `path` to a config file: a directory means `<dir>/epoch.toml`
pub fn config_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(CONFIG_FILE)
    } else {
        path.to_path_buf()
    }
}

/// Load and validate a showcase configuration
pub fn load(path: &Path) -> Result<ShowcaseConfig> {
    let config_path = config_path(path);
    if !config_path.exists() {
        anyhow::bail!(
            "No {} found at {}. Run `epoch init` to create one.",
            CONFIG_FILE,
            config_path.display()
        );
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config = parse(&content)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), eras = config.eras().len(), "loaded config");
    Ok(config)
}

/// Load `path` when given, otherwise fall back to the defaults
pub fn load_or_default(path: Option<&Path>) -> Result<ShowcaseConfig> {
    match path {
        Some(path) => load(path),
        None => Ok(ShowcaseConfig::default()),
    }
}

pub fn parse(content: &str) -> Result<ShowcaseConfig> {
    let config: ShowcaseConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Serialize to TOML string
pub fn to_toml(config: &ShowcaseConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}

/// Write the default configuration, refusing to clobber an existing file
/// unless `force` is set
pub fn write_default(path: &Path, force: bool) -> Result<PathBuf> {
    let config_path = config_path(path);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it.",
            config_path.display()
        );
    }
    let content = to_toml(&ShowcaseConfig::default())?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}
