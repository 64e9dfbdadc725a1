use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Store namespace, also the file stem on disk.
pub const PREFS_NAME: &str = "launcher_prefs";
/// Package id of the application started after boot.
pub const PREF_AUTO_START_APP: &str = "auto_start_app";

/// Named string key-value store.
pub trait PreferenceStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn put_string(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// JSON-file backed store for one namespace.
pub struct FilePreferenceStore {
    pub path: PathBuf,
    /// Loaded on first access.
    pub values: Mutex<Option<BTreeMap<String, String>>>,
}
