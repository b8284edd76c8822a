use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use log::{error, info};

use crate::models::FilterCriteria;

/// Persisted search filter preferences: three scalar keys stored as a
/// small JSON document, mirrored in memory for synchronous reads.
///
/// Two save variants exist. `save_filters` is fire-and-forget: the
/// in-memory copy always updates and a failed write is only logged.
/// `save_filters_sync` is write-with-confirmation: nothing changes unless
/// the write succeeds.
pub struct FilterPreferences {
    path: Option<PathBuf>,
    values: Mutex<FilterCriteria>,
}

impl FilterPreferences {
    /// Opens the preferences file, starting from defaults when it does
    /// not exist yet.
    pub fn open(path: PathBuf) -> Result<Self> {
        let values = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        } else {
            FilterCriteria::default()
        };

        Ok(Self {
            path: Some(path),
            values: Mutex::new(values),
        })
    }

    /// Preferences without a backing file; every write succeeds.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: Mutex::new(FilterCriteria::default()),
        }
    }

    pub fn language(&self) -> String {
        self.values.lock().unwrap().language.clone()
    }

    pub fn min_rating(&self) -> u32 {
        self.values.lock().unwrap().min_rating
    }

    pub fn name_contains(&self) -> String {
        self.values.lock().unwrap().name_contains.clone()
    }

    /// Snapshot of all three keys.
    pub fn criteria(&self) -> FilterCriteria {
        self.values.lock().unwrap().clone()
    }

    /// Fire-and-forget save. The in-memory copy is updated regardless;
    /// a failed write is logged and not retried.
    pub fn save_filters(&self, language: &str, min_rating: u32, name_contains: &str) {
        let criteria = FilterCriteria {
            language: language.to_string(),
            min_rating,
            name_contains: name_contains.to_string(),
        };
        if let Err(e) = self.write(&criteria) {
            error!("failed to persist filter preferences: {e:#}");
        }
        *self.values.lock().unwrap() = criteria;
    }

    /// Write-with-confirmation save. Returns false (leaving the current
    /// values untouched) when the write fails.
    pub fn save_filters_sync(&self, language: &str, min_rating: u32, name_contains: &str) -> bool {
        let criteria = FilterCriteria {
            language: language.to_string(),
            min_rating,
            name_contains: name_contains.to_string(),
        };
        match self.write(&criteria) {
            Ok(()) => {
                *self.values.lock().unwrap() = criteria;
                true
            }
            Err(e) => {
                error!("failed to persist filter preferences: {e:#}");
                false
            }
        }
    }

    fn write(&self, criteria: &FilterCriteria) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let raw = serde_json::to_string_pretty(criteria)?;
        fs::write(path, raw).with_context(|| format!("failed to write {}", path.display()))?;
        info!("filter preferences saved to {}", path.display());
        Ok(())
    }
}
