use std::{collections::BTreeMap, path::PathBuf, sync::Arc};
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// On-disk layout: the entries plus the last id handed out.
#[derive(Serialize, Deserialize)]
struct Snapshot<K: Ord, V> {
    #[serde(default)]
    sequence: i64,
    entries: BTreeMap<K, V>,
}

impl<K: Ord, V> Default for Snapshot<K, V> {
    fn default() -> Self {
        Self { sequence: 0, entries: BTreeMap::new() }
    }
}

/// Generic JSON file-backed ordered map with an id sequence.
///
/// Every mutation rewrites the whole file while the write lock is held, so the
/// file always reflects the latest in-memory state. Suited to small tables.
/// The sequence only moves forward, so ids are never reused, even across restarts.
pub struct JsonMapStore<K: Ord, V> {
    inner: RwLock<Snapshot<K, V>>,
    file_path: PathBuf,
}

fn storage_err(e: impl std::fmt::Display) -> ServiceError {
    ServiceError::Storage(e.to_string())
}

impl<K, V> JsonMapStore<K, V>
where
    K: Ord + Serialize + serde::de::DeserializeOwned + Clone,
    V: Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Open the store at `path`, creating the file with an empty map if missing.
    /// A file that exists but does not parse is an error rather than being overwritten.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(storage_err)?;
        }

        let snapshot: Snapshot<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.is_empty() => Snapshot::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Storage(format!("{}: {e}", file_path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = Snapshot::default();
                write_atomic(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(storage_err(e)),
        };

        Ok(Arc::new(Self { inner: RwLock::new(snapshot), file_path }))
    }

    /// All values in key order.
    pub async fn values(&self) -> Vec<V> {
        let snap = self.inner.read().await;
        snap.entries.values().cloned().collect()
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let snap = self.inner.read().await;
        snap.entries.get(key).cloned()
    }

    /// Values for the given keys, skipping keys that are absent.
    pub async fn get_many<'a, I>(&self, keys: I) -> Vec<V>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let snap = self.inner.read().await;
        keys.into_iter().filter_map(|k| snap.entries.get(k).cloned()).collect()
    }

    /// Take the next id from the sequence, build the entry from it, store and persist.
    pub async fn insert_next<F>(&self, build: F) -> Result<V, ServiceError>
    where
        F: FnOnce(i64) -> (K, V),
    {
        let mut snap = self.inner.write().await;
        let id = snap.sequence + 1;
        let (key, value) = build(id);
        snap.sequence = id;
        snap.entries.insert(key.clone(), value.clone());
        if let Err(e) = write_atomic(&self.file_path, &*snap).await {
            // keep memory consistent with the file; the id stays burnt
            snap.entries.remove(&key);
            return Err(e);
        }
        Ok(value)
    }

    /// Overwrite the value only when `key` is present; returns the previous value.
    /// A failed write leaves the previous value in place.
    pub async fn replace_existing(&self, key: &K, value: V) -> Result<Option<V>, ServiceError> {
        let mut snap = self.inner.write().await;
        let Some(slot) = snap.entries.get_mut(key) else {
            return Ok(None);
        };
        let previous = std::mem::replace(slot, value);
        if let Err(e) = write_atomic(&self.file_path, &*snap).await {
            snap.entries.insert(key.clone(), previous);
            return Err(e);
        }
        Ok(Some(previous))
    }

    /// Remove a key and persist; returns the removed value. Absent keys do not touch the file.
    /// A failed write puts the value back.
    pub async fn remove(&self, key: &K) -> Result<Option<V>, ServiceError> {
        let mut snap = self.inner.write().await;
        let Some(removed) = snap.entries.remove(key) else {
            return Ok(None);
        };
        if let Err(e) = write_atomic(&self.file_path, &*snap).await {
            snap.entries.insert(key.clone(), removed);
            return Err(e);
        }
        Ok(Some(removed))
    }
}

async fn write_atomic<T: Serialize>(path: &PathBuf, value: &T) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(value).map_err(storage_err)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).await.map_err(storage_err)?;
    fs::rename(&tmp, path).await.map_err(storage_err)?;
    Ok(())
}
