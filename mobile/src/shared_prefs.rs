pub use crate::shared_prefs_stt::*;
use crate::Config;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

impl FilePreferenceStore {
    /// Store `name` under `<config_dir>/shared_prefs/<name>.json`.
    pub fn open(config: &Config, name: &str) -> Self {
        Self::with_path(
            config
                .config_dir
                .join("shared_prefs")
                .join(format!("{}.json", name)),
        )
    }

    /// The launcher's own namespace.
    pub fn launcher(config: &Config) -> Self {
        Self::open(config, PREFS_NAME)
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            values: Mutex::new(None),
        }
    }

    fn read_file(path: &Path) -> BTreeMap<String, String> {
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                log::error!("Failed to read preferences {:?}: {}", path, e);
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(values) => values,
            Err(e) => {
                log::error!("Ignoring corrupt preferences {:?}: {}", path, e);
                BTreeMap::new()
            }
        }
    }

    /// The cache is only replaced after a successful write, so a panic while
    /// the lock was held never leaves it half-updated.
    fn lock_values(&self) -> MutexGuard<'_, Option<BTreeMap<String, String>>> {
        self.values.lock().unwrap_or_else(|poisoned| {
            log::error!("Preferences lock poisoned, recovering cached values of {:?}", self.path);
            poisoned.into_inner()
        })
    }

    fn write_file(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create preferences dir {:?}", dir))?;
        }

        let json = serde_json::to_string_pretty(values).context("Failed to serialize preferences")?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write {:?}", tmp_path))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace {:?}", self.path))?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get_string(&self, key: &str) -> Option<String> {
        let mut guard = self.lock_values();
        let value = guard
            .get_or_insert_with(|| Self::read_file(&self.path))
            .get(key)
            .cloned();
        value
    }

    fn put_string(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self.lock_values();
        let values = guard.get_or_insert_with(|| Self::read_file(&self.path));

        let mut updated = values.clone();
        updated.insert(key.to_string(), value.to_string());
        self.write_file(&updated)?;
        *values = updated;

        log::debug!("Preference {}={} saved to {:?}", key, value, self.path);
        Ok(())
    }
}

/// Configured auto-start package; an empty value counts as unset.
pub fn get_auto_start_app(prefs: &dyn PreferenceStore) -> Option<String> {
    prefs
        .get_string(PREF_AUTO_START_APP)
        .filter(|package_id| !package_id.is_empty())
}

pub fn set_auto_start_app(prefs: &dyn PreferenceStore, package_id: &str) -> Result<()> {
    prefs.put_string(PREF_AUTO_START_APP, package_id)
}
