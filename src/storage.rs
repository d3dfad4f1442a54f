//! Persisted extension state behind a key-value seam
//!
//! The browser owns the real store; the crate only sees [`Storage`]. Values
//! are JSON, keyed the same way the extension keys its local storage.

use crate::error::{Result, TradeToolsError};
use crate::models::{CardSet, Collection, DisplaySettings, Rarity};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const PROFILE_URL_KEY: &str = "profileUrl";
pub const COLLECTION_KEY: &str = "collection";
pub const TRADING_SETTINGS_KEY: &str = "tradingSettings";

pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-process store; what the wasm bindings and tests use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<Map<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.values.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// A single JSON object on disk. A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(TradeToolsError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, values: &Map<String, Value>) -> Result<()> {
        let content = serde_json::to_string_pretty(values)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| TradeToolsError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, content).map_err(|source| TradeToolsError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);
        self.write_all(&values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

/// Everything the extension persists between page loads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredState {
    pub profile_url: Option<String>,
    pub collection: Option<Collection>,
    pub trading_settings: DisplaySettings,
}

impl StoredState {
    /// Values that exist but do not deserialize are treated as absent.
    /// Collection stats are always rebuilt from the buckets.
    pub fn load(storage: &dyn Storage) -> Result<Self> {
        let profile_url = read_key::<String>(storage, PROFILE_URL_KEY)?
            .filter(|url| !url.trim().is_empty());
        let collection = read_collection(storage)?;
        let trading_settings = read_key::<DisplaySettings>(storage, TRADING_SETTINGS_KEY)?.unwrap_or_default();

        Ok(Self {
            profile_url,
            collection,
            trading_settings,
        })
    }

    pub fn save_profile_url(storage: &dyn Storage, url: &str) -> Result<()> {
        storage.set(PROFILE_URL_KEY, Value::String(url.to_string()))
    }

    pub fn save_collection(storage: &dyn Storage, collection: &Collection) -> Result<()> {
        write_key(storage, COLLECTION_KEY, collection)
    }

    pub fn save_settings(storage: &dyn Storage, settings: &DisplaySettings) -> Result<()> {
        write_key(storage, TRADING_SETTINGS_KEY, settings)
    }

    /// Restore the default filters
    pub fn reset_settings(storage: &dyn Storage) -> Result<DisplaySettings> {
        let settings = DisplaySettings::default();
        Self::save_settings(storage, &settings)?;
        Ok(settings)
    }
}

fn read_key<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>> {
    Ok(read_value(storage, key)?.and_then(|value| parse_value(key, &value)))
}

fn read_collection(storage: &dyn Storage) -> Result<Option<Collection>> {
    let Some(value) = read_value(storage, COLLECTION_KEY)? else {
        return Ok(None);
    };
    if is_legacy_collection(&value) {
        warn!(
            key = COLLECTION_KEY,
            "stored collection uses the old folder/symbol keyed format; scrape your profile again"
        );
        return Ok(None);
    }
    Ok(parse_value::<Collection>(COLLECTION_KEY, &value).map(|mut collection| {
        collection.recompute_stats();
        collection
    }))
}

fn read_value(storage: &dyn Storage, key: &str) -> Result<Option<Value>> {
    Ok(storage.get(key)?.filter(|value| !value.is_null()))
}

fn parse_value<T: DeserializeOwned>(key: &str, value: &Value) -> Option<T> {
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(key, error = %e, "ignoring unreadable stored value");
            None
        }
    }
}

/// Buckets keyed by image folder (`genetic_apex`) or rarity symbol (`♢`)
fn is_legacy_collection(value: &Value) -> bool {
    ["wanted", "tradable"]
        .into_iter()
        .filter_map(|role| value.get(role).and_then(Value::as_object))
        .flat_map(|sets| sets.iter())
        .any(|(set, rarities)| {
            CardSet::from_folder(set).is_some()
                || rarities
                    .as_object()
                    .is_some_and(|rarities| rarities.keys().any(|key| Rarity::from_symbol(key).is_some()))
        })
}

fn write_key<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) -> Result<()> {
    storage.set(key, serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Card, CardRole, CardSet, Rarity};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_empty_storage_loads_defaults() {
        let storage = MemoryStorage::new();
        let state = StoredState::load(&storage).unwrap();
        assert_eq!(state, StoredState::default());
    }

    #[test]
    fn test_malformed_values_read_as_absent() {
        let storage = MemoryStorage::new();
        storage.set(COLLECTION_KEY, json!("not a collection")).unwrap();
        storage.set(TRADING_SETTINGS_KEY, json!(42)).unwrap();
        storage.set(PROFILE_URL_KEY, json!("")).unwrap();

        let state = StoredState::load(&storage).unwrap();
        assert_eq!(state.collection, None);
        assert_eq!(state.profile_url, None);
        assert_eq!(state.trading_settings, DisplaySettings::default());
    }

    #[test]
    fn test_file_storage_persists_state() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("state.json"));

        let mut collection = Collection::default();
        collection.add(CardRole::Wanted, Card::new(CardSet::A1, Rarity::Diamond1, "5"));
        StoredState::save_collection(&storage, &collection).unwrap();
        StoredState::save_profile_url(&storage, "https://ptcgp-tracker.com/u/abc").unwrap();

        let reopened = FileStorage::new(storage.path());
        let state = StoredState::load(&reopened).unwrap();
        assert_eq!(state.profile_url.as_deref(), Some("https://ptcgp-tracker.com/u/abc"));
        let stored = state.collection.unwrap();
        assert!(stored.contains(CardRole::Wanted, &Card::new(CardSet::A1, Rarity::Diamond1, "5")));
        assert_eq!(stored.last_update.timestamp_millis(), collection.last_update.timestamp_millis());

        reopened.remove(COLLECTION_KEY).unwrap();
        assert_eq!(StoredState::load(&reopened).unwrap().collection, None);
    }

    #[test]
    fn test_stats_rebuilt_on_load() {
        let storage = MemoryStorage::new();
        storage
            .set(
                COLLECTION_KEY,
                json!({
                    "wanted": { "A1": { "diamond1": ["5", "9"] } },
                    "tradable": { "A2": { "star1": ["12"] } },
                    "lastUpdate": 1_700_000_000_000_i64
                }),
            )
            .unwrap();

        let collection = StoredState::load(&storage).unwrap().collection.unwrap();
        assert_eq!(collection.stats.wanted.total, 2);
        assert_eq!(collection.stats.wanted.by_rarity[&Rarity::Diamond1], 2);
        assert_eq!(collection.stats.tradable.total, 1);
    }

    #[test]
    fn test_legacy_collection_reads_as_absent() {
        let by_folder = json!({ "wanted": { "genetic_apex": { "diamond1": ["5"] } } });
        let by_symbol = json!({ "tradable": { "A1": { "♢": ["5"] } } });
        assert!(is_legacy_collection(&by_folder));
        assert!(is_legacy_collection(&by_symbol));
        assert!(!is_legacy_collection(&json!({ "wanted": { "A1": { "diamond1": ["5"] } } })));

        let storage = MemoryStorage::new();
        storage.set(COLLECTION_KEY, by_folder).unwrap();
        assert_eq!(StoredState::load(&storage).unwrap().collection, None);
    }
}
