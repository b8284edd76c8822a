use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use tokio::sync::watch;

use crate::models::Profile;

/// JSON document store for the single local profile.
///
/// The profile is observed as a live stream: the current record is
/// available immediately on subscription and every save republishes the
/// whole record. Saves overwrite wholesale; there is no partial-field
/// update.
pub struct ProfileDataStore {
    path: Option<PathBuf>,
    current: watch::Sender<Profile>,
}

impl ProfileDataStore {
    /// Opens the profile document, publishing defaults when the file
    /// does not exist yet.
    pub fn open(path: PathBuf) -> Result<Self> {
        let profile = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        } else {
            Profile::default()
        };

        let (current, _) = watch::channel(profile);
        Ok(Self {
            path: Some(path),
            current,
        })
    }

    /// Store without a backing file, for tests and ephemeral use.
    pub fn in_memory() -> Self {
        let (current, _) = watch::channel(Profile::default());
        Self {
            path: None,
            current,
        }
    }

    /// Live view of the profile.
    pub fn profile(&self) -> watch::Receiver<Profile> {
        self.current.subscribe()
    }

    /// Overwrites the stored profile and publishes the new record.
    pub fn save_profile(&self, profile: &Profile) -> Result<()> {
        if let Some(path) = &self.path {
            let raw = serde_json::to_string_pretty(profile)?;
            fs::write(path, raw).with_context(|| format!("failed to write {}", path.display()))?;
            info!("profile saved to {}", path.display());
        }
        self.current.send_replace(profile.clone());
        Ok(())
    }
}
