use std::{path::PathBuf, str::FromStr};
use tracing::{info, warn};

/// Where the scheduling data lives for this session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Authenticated operation against the shared relational store
    Server,
    /// Guest operation against on-device storage, with one implicit owner
    Local,
}

impl FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "server" => Ok(Self::Server),
            "local" | "guest" => Ok(Self::Local),
            _ => Err(s.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Explicitly requested storage mode. When absent the persisted
    /// guest flag on the device decides.
    pub storage_mode: Option<StorageMode>,
    /// Postgres connection string, required for `StorageMode::Server`
    pub database_url: Option<String>,
    /// Directory holding the on-device key value files
    pub local_storage_dir: PathBuf,
}

impl Config {
    pub fn new() -> Self {
        let storage_mode = match std::env::var("STORAGE_MODE") {
            Ok(mode) => match mode.parse::<StorageMode>() {
                Ok(mode) => Some(mode),
                Err(_) => {
                    warn!(
                        "The given STORAGE_MODE: {} is not valid, expected `server` or `local`. Falling back to the device guest flag.",
                        mode
                    );
                    None
                }
            },
            Err(_) => None,
        };

        let database_url = std::env::var("DATABASE_URL").ok();

        let default_dir = "./.plant_scheduler";
        let local_storage_dir = match std::env::var("LOCAL_STORAGE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => {
                info!(
                    "Did not find LOCAL_STORAGE_DIR environment variable. Using {}.",
                    default_dir
                );
                PathBuf::from(default_dir)
            }
        };

        Self {
            storage_mode,
            database_url,
            local_storage_dir,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_storage_modes() {
        assert_eq!("server".parse::<StorageMode>(), Ok(StorageMode::Server));
        assert_eq!("LOCAL".parse::<StorageMode>(), Ok(StorageMode::Local));
        assert_eq!("guest".parse::<StorageMode>(), Ok(StorageMode::Local));
        assert!("cloud".parse::<StorageMode>().is_err());
    }
}
