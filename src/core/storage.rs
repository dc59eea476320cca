//! Key-value persistence for tracker state
//!
//! Each state field is stored under its own key as a JSON document, so a
//! mutation only rewrites the fields it touched.

use crate::core::models::{ElectiveRecord, FreeElectiveRecord};
use crate::core::state::{check_electives, check_free_electives, StateKey, TrackerState};
use crate::core::TrackerError;
use crate::{debug, error, warn};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A string key-value store
pub trait KeyValueStore {
    /// Read the value stored under `key`
    ///
    /// # Errors
    /// Returns `TrackerError::Storage` if the backend cannot be read
    fn get(&self, key: &str) -> Result<Option<String>, TrackerError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns `TrackerError::Storage` if the backend cannot be written
    fn set(&mut self, key: &str, value: &str) -> Result<(), TrackerError>;

    /// Delete the value stored under `key`, if any
    ///
    /// # Errors
    /// Returns `TrackerError::Storage` if the backend cannot be written
    fn remove(&mut self, key: &str) -> Result<(), TrackerError>;
}

/// In-memory store, mainly for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, TrackerError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), TrackerError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store: one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    /// Returns `TrackerError::Storage` if the directory cannot be created
    pub fn open(dir: &Path) -> Result<Self, TrackerError> {
        fs::create_dir_all(dir).map_err(|e| {
            TrackerError::Storage(format!("cannot create {}: {e}", dir.display()))
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Directory holding the files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, TrackerError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| TrackerError::Storage(format!("cannot read {}: {e}", path.display())))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
        let path = self.path_for(key);
        fs::write(&path, value)
            .map_err(|e| TrackerError::Storage(format!("cannot write {}: {e}", path.display())))
    }

    fn remove(&mut self, key: &str) -> Result<(), TrackerError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(TrackerError::Storage(
                format!("cannot remove {}: {e}", path.display()),
            )),
            _ => Ok(()),
        }
    }
}

/// Serialize the listed fields of `state` into `store`.
///
/// All fields are encoded before anything is written. If a write fails,
/// the fields already written are restored to their previous values, so
/// the store holds either every new field or none of them.
///
/// # Errors
/// Returns `TrackerError::Storage` if reading, serialization or a write fails
pub fn persist(
    store: &mut dyn KeyValueStore,
    state: &TrackerState,
    keys: &[StateKey],
) -> Result<(), TrackerError> {
    let encoded = keys
        .iter()
        .map(|&key| encode_field(state, key).map(|json| (key, json)))
        .collect::<Result<Vec<_>, _>>()?;
    let previous = keys
        .iter()
        .map(|key| store.get(key.storage_key()))
        .collect::<Result<Vec<_>, _>>()?;

    for (written, (key, json)) in encoded.iter().enumerate() {
        if let Err(e) = store.set(key.storage_key(), json) {
            error!("Writing {key} failed, restoring {written} field(s): {e}");
            rollback(store, &keys[..written], &previous[..written]);
            return Err(e);
        }
        debug!("Persisted {key}");
    }
    Ok(())
}

fn encode_field(state: &TrackerState, key: StateKey) -> Result<String, TrackerError> {
    match key {
        StateKey::CompletedCourses => serde_json::to_string(&state.completed_courses),
        StateKey::ElectiveCourses => serde_json::to_string(&state.elective_courses),
        StateKey::FreeElectiveCourses => serde_json::to_string(&state.free_elective_courses),
        StateKey::Grades => serde_json::to_string(&state.grades),
        StateKey::MathCredits => serde_json::to_string(&state.math_credits),
    }
    .map_err(|e| TrackerError::Storage(format!("cannot encode {key}: {e}")))
}

fn rollback(store: &mut dyn KeyValueStore, keys: &[StateKey], previous: &[Option<String>]) {
    for (key, old) in keys.iter().zip(previous) {
        let restored = match old {
            Some(json) => store.set(key.storage_key(), json),
            None => store.remove(key.storage_key()),
        };
        if let Err(e) = restored {
            error!("Could not restore {key}: {e}");
        }
    }
}

/// Rebuild a state from `store`, field by field.
///
/// Missing fields take their default; corrupt fields are logged and
/// replaced by their default so one bad field never hides the others.
///
/// # Errors
/// Returns `TrackerError::Storage` only if the backend itself fails
pub fn rehydrate(store: &dyn KeyValueStore) -> Result<TrackerState, TrackerError> {
    Ok(TrackerState {
        completed_courses: load_field(store, StateKey::CompletedCourses)?,
        elective_courses: load_checked::<Vec<ElectiveRecord>>(
            store,
            StateKey::ElectiveCourses,
            |records| check_electives(records),
        )?,
        free_elective_courses: load_checked::<Vec<FreeElectiveRecord>>(
            store,
            StateKey::FreeElectiveCourses,
            |records| check_free_electives(records),
        )?,
        grades: load_field(store, StateKey::Grades)?,
        math_credits: load_field(store, StateKey::MathCredits)?,
    })
}

fn load_field<T: DeserializeOwned + Default>(
    store: &dyn KeyValueStore,
    key: StateKey,
) -> Result<T, TrackerError> {
    let Some(raw) = store.get(key.storage_key())? else {
        return Ok(T::default());
    };
    Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!("Ignoring corrupt stored field '{key}': {e}");
        T::default()
    }))
}

fn load_checked<T: DeserializeOwned + Default>(
    store: &dyn KeyValueStore,
    key: StateKey,
    check: impl Fn(&T) -> Result<(), String>,
) -> Result<T, TrackerError> {
    let value = load_field(store, key)?;
    if let Err(reason) = check(&value) {
        warn!("Ignoring invalid stored field '{key}': {reason}");
        return Ok(T::default());
    }
    Ok(value)
}
