//! SDK configuration
//!
//! Every field has a default, so a partial JSON document is enough.
//!
//! ```json
//! {
//!     "space_name": "basketball",
//!     "log_statements": true,
//!     "auto_migrate_drop_columns": false
//! }
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Graph space selected with `USE` when the handle is opened; empty
    /// leaves the executor's current space alone
    pub space_name: String,
    /// Log every executed statement at info level instead of debug
    pub log_statements: bool,
    /// Allow automatic migration to drop live properties the model no
    /// longer declares
    pub auto_migrate_drop_columns: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            space_name: String::new(),
            log_statements: false,
            auto_migrate_drop_columns: false,
        }
    }
}

impl Config {
    pub fn new<S: Into<String>>(space_name: S) -> Self {
        Self {
            space_name: space_name.into(),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(format!("invalid config: {}", e)))
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }
}
