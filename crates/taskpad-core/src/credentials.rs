//! Credential persistence.
//!
//! Stores the single username/password record in `<home>/auth.json` with
//! restricted permissions (0600). Presence of a record means "re-validate at
//! startup", never "trust blindly". Credentials are never logged.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::paths;
use crate::error::Result;
use crate::models::Credentials;

/// Durable store for the single credential record.
///
/// Purely a storage concern: nothing here validates that the credentials are
/// accepted by the service.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store at the default location, `<home>/auth.json`.
    pub fn new() -> Self {
        Self {
            path: paths::credentials_path(),
        }
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persists credentials, overwriting any prior record.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(credentials)?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)?;
            file.write_all(contents.as_bytes())?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)?;
        }

        Ok(())
    }

    /// Loads the persisted record.
    ///
    /// A missing or malformed file reads as absent.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn load(&self) -> Result<Option<Credentials>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents).ok())
    }

    /// Removes the persisted record.
    ///
    /// Returns whether a record was actually removed; clearing an absent
    /// record succeeds.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}
