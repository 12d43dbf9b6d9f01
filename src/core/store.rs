//! Store handle for campsite state.
//!
//! A store is a directory holding the SQLite database, its config file and
//! the broker audit log. Every model operation is scoped to one store.

use crate::core::config::{self, CampConfig};
use crate::core::error::CampError;
use std::path::{Path, PathBuf};

/// Store handle representing one campsite workspace.
#[derive(Debug, Clone)]
pub struct Store {
    /// Absolute or caller-relative path to the store root directory
    pub root: PathBuf,
    /// Config loaded from `<root>/config.toml` (defaults when absent)
    pub config: CampConfig,
}

impl Store {
    /// Open a store rooted at `root`, reading its config if present.
    /// The directory itself is created lazily by `db::initialize_camp_db`.
    pub fn open(root: &Path) -> Result<Self, CampError> {
        let config = config::load_config(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    pub fn with_config(root: &Path, config: CampConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.root.join(&self.config.database.file)
    }

    pub fn audit_log_path(&self) -> PathBuf {
        self.root.join(&self.config.audit.file)
    }
}
