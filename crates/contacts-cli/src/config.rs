use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::Result;
use dirs::config_dir;
use serde::{Deserialize, Serialize};

/// Contacts file used when the config does not name one, relative to the working directory.
pub const DEFAULT_CONTACTS_FILE: &str = "contacts.txt";

/// User-level configuration loaded from `~/.config/contacts/config.toml` (platform-specific).
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Override for the contacts file location.
    pub contacts_file: Option<PathBuf>,
}

impl Config {
    pub fn contacts_path(&self) -> PathBuf {
        self.contacts_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTACTS_FILE))
    }
}

/// Read the user's contacts config, falling back to defaults when none exists.
pub fn load() -> Result<Config> {
    let path = default_path()?;
    load_from_path(path)
}

/// Parse the contacts config at `path`. An absent or blank file means "use `contacts.txt`".
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let cfg: Config = toml::from_str(&contents)?;
    Ok(cfg)
}

/// `<config_dir>/contacts/config.toml` for the current platform.
pub fn default_path() -> Result<PathBuf> {
    let base = config_dir().ok_or_else(|| color_eyre::eyre::eyre!("no config dir available"))?;
    Ok(base.join("contacts").join("config.toml"))
}

/// Write `config` to the default path unless a file is already there.
pub fn write_default_if_missing(config: &Config) -> Result<PathBuf> {
    write_if_missing(config, &default_path()?)
}

/// Write `config` to `path`, creating parent directories as needed.
/// An existing file is left untouched to avoid clobbering user edits.
pub fn write_if_missing(config: &Config, path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(path.to_path_buf());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(config)?;
    fs::write(path, body)?;
    Ok(path.to_path_buf())
}
