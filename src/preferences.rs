//! Persisted user preferences (currently the dark mode flag).
use serde_json::Map;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use tracing::warn;

/// Key of the dark mode flag.
pub const DARK_MODE_KEY: &str = "darkMode";

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("Failed to access preference file: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid preference file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key/value storage for preferences; values are JSON values.
pub trait PreferenceStore {
    /// Returns the stored value of `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>, PreferenceError>;

    /// Stores `value` under `key`.
    fn set(&mut self, key: &str, value: Value) -> Result<(), PreferenceError>;
}

/// Preference store kept in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, Value>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), PreferenceError> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Preference store backed by a JSON object file.
///
/// A missing file reads as an empty store. The file and its parent directories
/// are created on the first write.
#[derive(Clone, Debug)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        JsonFilePreferenceStore { path: path.into() }
    }

    /// Default preference file under the user configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("chartify").join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, PreferenceError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Map::new()),
            Err(error) => Err(error.into()),
        }
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PreferenceError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), PreferenceError> {
        let mut values = self.load()?;
        values.insert(key.to_owned(), value);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&values)?)?;
        debug!(path = %self.path.display(), key, "saved preference");
        Ok(())
    }
}

/// Dark mode flag stored as a JSON boolean under [`DARK_MODE_KEY`].
#[derive(Debug)]
pub struct ThemePreference<S> {
    store: S,
}

impl<S: PreferenceStore> ThemePreference<S> {
    pub fn new(store: S) -> Self {
        ThemePreference { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves whether dark mode is on.
    ///
    /// The stored flag wins; without one (or with an unreadable one) the system
    /// hint is used, and without a hint the light theme. A `"true"` / `"false"`
    /// string is read as the matching boolean.
    pub fn resolve(&self, system_hint: Option<bool>) -> bool {
        let stored = match self.store.get(DARK_MODE_KEY) {
            Ok(Some(value)) => {
                let flag = stored_flag(&value);
                if flag.is_none() {
                    warn!(%value, "ignoring invalid dark mode preference");
                }
                flag
            }
            Ok(None) => None,
            Err(error) => {
                warn!(%error, "failed to read dark mode preference");
                None
            }
        };
        stored.or(system_hint).unwrap_or(false)
    }

    /// Persists the dark mode flag.
    pub fn save(&mut self, dark_mode: bool) -> Result<(), PreferenceError> {
        self.store.set(DARK_MODE_KEY, Value::Bool(dark_mode))
    }
}

fn stored_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}
