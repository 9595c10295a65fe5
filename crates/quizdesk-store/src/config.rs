use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use directories_next::ProjectDirs;

use crate::StoreError;

/// Where client state lives on disk.
///
/// The home directory can be overridden, usually from `QUIZDESK_CONFIG_HOME`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// home is the path to the user's global config directory
    pub home: Utf8PathBuf,
}

impl Config {
    /// Creates a new instance of `Config`
    pub fn new(override_home: Option<&impl AsRef<Utf8Path>>) -> Result<Config, StoreError> {
        let home = match override_home {
            Some(home) => home.as_ref().to_path_buf(),
            None => {
                // Lin: /home/alice/.config/quizdesk
                // Win: C:\Users\Alice\AppData\Roaming\Quizdesk\Quizdesk\config
                // Mac: /Users/Alice/Library/Application Support/dev.Quizdesk.Quizdesk
                let dirs = ProjectDirs::from("dev", "Quizdesk", "Quizdesk")
                    .ok_or(StoreError::DefaultConfigDirNotFound)?;
                Utf8PathBuf::try_from(dirs.config_dir().to_path_buf())?
            }
        };

        if home.exists() && !home.is_dir() {
            return Err(StoreError::InvalidConfigHome(home.to_string()));
        }

        Ok(Config { home })
    }

    /// Removes all configuration files from filesystem. A missing home is not an error.
    pub fn clear(&self) -> Result<(), StoreError> {
        tracing::debug!(home_dir = %self.home);
        match fs::remove_dir_all(&self.home) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}
