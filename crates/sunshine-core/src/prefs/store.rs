//! Preference store backends.
//!
//! The memory backend keeps a `key -> JSON value` map behind a mutex. The
//! file backend keeps nothing in memory and replaces the file atomically on
//! every write.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;
use tracing::{debug, warn};

use super::PreferenceStore;
use super::errors::PrefsError;

type PrefMap = BTreeMap<String, Value>;

fn lock(values: &Mutex<PrefMap>) -> MutexGuard<'_, PrefMap> {
    // A panic while holding the lock cannot leave the map half-written:
    // every mutation is a single insert/remove.
    values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn read_bool(map: &PrefMap, key: &str, default: bool) -> bool {
    match map.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            debug!(event = "core.prefs.type_mismatch", key = key, expected = "bool", found = %other);
            default
        }
        None => default,
    }
}

fn read_i64(map: &PrefMap, key: &str, default: i64) -> i64 {
    match map.get(key).map(|v| v.as_i64()) {
        Some(Some(n)) => n,
        Some(None) => {
            debug!(event = "core.prefs.type_mismatch", key = key, expected = "i64");
            default
        }
        None => default,
    }
}

fn read_string(map: &PrefMap, key: &str, default: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            debug!(event = "core.prefs.type_mismatch", key = key, expected = "string");
            default.to_string()
        }
        None => default.to_string(),
    }
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<PrefMap>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        read_bool(&lock(&self.values), key, default)
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        read_i64(&lock(&self.values), key, default)
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        read_string(&lock(&self.values), key, default)
    }

    fn put(&self, key: &str, value: Value) -> Result<(), PrefsError> {
        lock(&self.values).insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PrefsError> {
        lock(&self.values).remove(key);
        Ok(())
    }
}

/// File-backed store (`~/.sunshine/prefs.json`).
///
/// Holds no copy of the values: every read parses the file and every write
/// is read-modify-write under `write_lock`, so a change made by another
/// process (e.g. `sunshine prefs` while `sunshine watch` runs) is seen by the
/// next call and never overwritten with stale values.
#[derive(Debug)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonPreferenceStore {
    /// Open the store at `path`. A missing file is an empty store; a corrupt
    /// file is logged and replaced on the next write.
    pub fn open(path: &Path) -> Result<Self, PrefsError> {
        let store = Self {
            path: path.to_path_buf(),
            write_lock: Mutex::new(()),
        };
        store.read_map()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<PrefMap, PrefsError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<PrefMap>(&content) {
                Ok(values) => Ok(values),
                Err(e) => {
                    warn!(
                        event = "core.prefs.parse_failed",
                        file_path = %self.path.display(),
                        error = %e,
                        "Preference file is corrupted - starting fresh (previous values will be lost)"
                    );
                    Ok(PrefMap::new())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PrefMap::new()),
            Err(source) => Err(PrefsError::ReadFailed {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }

    /// Current values for a read. An unreadable file reads as empty.
    fn snapshot(&self) -> PrefMap {
        self.read_map().unwrap_or_else(|e| {
            warn!(event = "core.prefs.read_failed", error = %e);
            PrefMap::new()
        })
    }

    fn update(&self, apply: impl FnOnce(&mut PrefMap) -> bool) -> Result<(), PrefsError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut values = self.read_map()?;
        if apply(&mut values) {
            self.persist(&values)?;
        }
        Ok(())
    }

    fn persist(&self, values: &PrefMap) -> Result<(), PrefsError> {
        let write_err = |source: std::io::Error| PrefsError::WriteFailed {
            path: self.path.display().to_string(),
            source,
        };

        let content =
            serde_json::to_string_pretty(values).map_err(|e| PrefsError::SerializeFailed {
                message: e.to_string(),
            })?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        read_bool(&self.snapshot(), key, default)
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        read_i64(&self.snapshot(), key, default)
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        read_string(&self.snapshot(), key, default)
    }

    fn put(&self, key: &str, value: Value) -> Result<(), PrefsError> {
        self.update(|values| {
            values.insert(key.to_string(), value);
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), PrefsError> {
        self.update(|values| values.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_defaults_and_roundtrip() {
        let store = MemoryPreferenceStore::new();
        assert!(store.get_bool("flag", true));
        assert_eq!(store.get_i64("n", 7), 7);

        store.put_bool("flag", false).unwrap();
        store.put_i64("n", 42).unwrap();
        store.put_string("s", "hello").unwrap();
        assert!(!store.get_bool("flag", true));
        assert_eq!(store.get_i64("n", 0), 42);
        assert_eq!(store.get_string("s", ""), "hello");
    }

    #[test]
    fn test_type_mismatch_returns_default() {
        let store = MemoryPreferenceStore::new();
        store.put_string("flag", "yes").unwrap();
        assert!(store.get_bool("flag", true));
        assert_eq!(store.get_i64("flag", -1), -1);
    }

    #[test]
    fn test_json_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let store = JsonPreferenceStore::open(&path).unwrap();
        store.put_i64("last_notification", 1_700_000_000_000).unwrap();
        store.put_bool("units_metric", false).unwrap();
        drop(store);

        let reopened = JsonPreferenceStore::open(&path).unwrap();
        assert_eq!(reopened.get_i64("last_notification", 0), 1_700_000_000_000);
        assert!(!reopened.get_bool("units_metric", true));
    }

    #[test]
    fn test_json_store_corrupt_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonPreferenceStore::open(&path).unwrap();
        assert_eq!(store.get_i64("last_notification", 0), 0);

        store.put_i64("last_notification", 5).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let parsed: PrefMap = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["last_notification"], 5);
    }

    #[test]
    fn test_json_store_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let store = JsonPreferenceStore::open(&path).unwrap();
        store.put_string("sync_breadcrumbs", "sync wk").unwrap();
        store.remove("sync_breadcrumbs").unwrap();

        let reopened = JsonPreferenceStore::open(&path).unwrap();
        assert_eq!(reopened.get_string("sync_breadcrumbs", "none"), "none");
    }

    #[test]
    fn test_json_store_sees_writes_from_another_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let long_lived = JsonPreferenceStore::open(&path).unwrap();
        long_lived.put_bool("enable_notifications", true).unwrap();

        let other = JsonPreferenceStore::open(&path).unwrap();
        other.put_bool("enable_notifications", false).unwrap();

        assert!(!long_lived.get_bool("enable_notifications", true));

        long_lived.put_i64("last_sync", 1_700_000_000_000).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let parsed: PrefMap = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["enable_notifications"], false);
        assert_eq!(parsed["last_sync"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_json_store_file_deleted_underneath_reads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let store = JsonPreferenceStore::open(&path).unwrap();
        store.put_i64("last_notification", 5).unwrap();

        fs::remove_file(&path).unwrap();

        assert_eq!(store.get_i64("last_notification", 0), 0);
    }
}
