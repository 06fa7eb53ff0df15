use std::env;
use std::path::PathBuf;

use crate::source::DirectorySource;

/// Environment variable naming the directory holding the reference documents.
pub const DATA_DIR_VAR: &str = "PAEDSRX_DATA_DIR";

const DEFAULT_DATA_DIR: &str = "data";

/// Where the knowledge store lives.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Read from the environment, defaulting to `./data`.
    pub fn from_env() -> Self {
        let data_dir = env::var(DATA_DIR_VAR).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        StoreConfig {
            data_dir: PathBuf::from(data_dir),
        }
    }

    pub fn source(&self) -> DirectorySource {
        DirectorySource::new(self.data_dir.clone())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}
