//! Best-effort JSON records on top of the key-value store
//!
//! Every record is local and non-critical: a failed read or a malformed value
//! degrades to "no record", a failed write is logged and dropped. Callers never
//! see an error from here.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::platform::{KeyValueStore, StorageError};

/// `{ startedAt }` of the last brick-breaker session
pub const BRICKBREAKER_SESSION_KEY: &str = "brickbreaker.session";
/// Map of puzzle date key to `CrosswordResult`
pub const CROSSWORD_RESULTS_KEY: &str = "crossword.results";
/// Epoch-ms of the last wheel spin
pub const SPIN_LAST_TIMESTAMP_KEY: &str = "spin.lastTimestamp";
/// Tunables
pub const SETTINGS_KEY: &str = "settings";

/// Strict read: distinguishes absent from malformed
pub fn try_load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| StorageError::Malformed {
            key: key.to_string(),
            source,
        })
}

/// Strict write
pub fn try_save<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

/// Read a record, treating any failure as absent
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match try_load(store, key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Ignoring stored {key}: {e}");
            None
        }
    }
}

/// Write a record, dropping it on failure
pub fn save<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) {
    if let Err(e) = try_save(store, key, value) {
        log::warn!("Dropped write to {key}: {e}");
    }
}

/// Remove a record, ignoring failures
pub fn remove(store: &dyn KeyValueStore, key: &str) {
    if let Err(e) = store.remove(key) {
        log::warn!("Failed to remove {key}: {e}");
    }
}
