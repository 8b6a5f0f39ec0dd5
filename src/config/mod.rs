//! Configuration file loading.
//!
//! Identity lives in `~/.onetimesecret.toml`:
//!
//! ```toml
//! username = "you@example.com"
//! apitoken = "..."
//! ```
//!
//! To get an API token simply sign up at <https://onetimesecret.com/>.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{OtsError, Result};

/// Identity settings loaded from the configuration file.
///
/// Both fields are optional; absent values yield an anonymous client.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    /// Account username on the service.
    #[serde(default)]
    pub username: Option<String>,

    /// API token, generated in the account settings.
    #[serde(default)]
    pub apitoken: Option<String>,
}

impl Settings {
    /// Name of the config file we look for in the home directory.
    const FILE_NAME: &'static str = ".onetimesecret.toml";

    /// Load settings from an explicit path, or from the default
    /// location when none is given.
    ///
    /// An explicit path must exist and parse. The default file may be
    /// absent, in which case empty settings are returned; a default file
    /// that exists but cannot be parsed is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| OtsError::Config(format!("Failed to parse {}: {e}", path.display())))
    }
}

/// Default config file location: `$HOME/.onetimesecret.toml`.
fn default_path() -> Option<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()?;
    Some(PathBuf::from(home).join(Settings::FILE_NAME))
}
