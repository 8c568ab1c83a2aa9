use std::{collections::BTreeMap, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// Generic ordered key-value map store, optionally backed by a JSON file.
///
/// With a file path every mutation rewrites the whole file while the write
/// guard is held, so the file always matches the last committed map.
/// Without one the store is process-local.
pub struct JsonMapStore<K, V> {
    inner: RwLock<BTreeMap<K, V>>,
    file_path: Option<PathBuf>,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Ord + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let map: BTreeMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(ServiceError::db)?,
            Err(_) => {
                let empty: BTreeMap<K, V> = BTreeMap::new();
                fs::write(&file_path, serde_json::to_vec(&empty).map_err(ServiceError::db)?)
                    .await
                    .map_err(ServiceError::db)?;
                empty
            }
        };

        Ok(Arc::new(Self { inner: RwLock::new(map), file_path: Some(file_path) }))
    }

    /// Store that never touches the filesystem.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(BTreeMap::new()), file_path: None })
    }

    async fn persist(&self, map: &BTreeMap<K, V>) -> Result<(), ServiceError> {
        let Some(path) = &self.file_path else { return Ok(()) };
        let data = serde_json::to_vec(map).map_err(ServiceError::db)?;
        fs::write(path, data).await.map_err(ServiceError::db)?;
        Ok(())
    }

    /// All values in key order.
    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Largest key currently stored.
    pub async fn last_key(&self) -> Option<K> {
        let map = self.inner.read().await;
        map.keys().next_back().cloned()
    }

    /// Remove a key and persist; returns whether it existed.
    pub async fn remove(&self, key: &K) -> Result<bool, ServiceError> {
        self.update_map(|m| Ok(m.remove(key).is_some())).await
    }

    /// Apply a mutation to a copy of the map, persist the copy, then commit it,
    /// all under the write guard. Neither memory nor the file changes when the
    /// closure or the write fails.
    pub async fn update_map<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut BTreeMap<K, V>) -> Result<T, ServiceError>,
    {
        let mut map = self.inner.write().await;
        let mut next = map.clone();
        let out = f(&mut next)?;
        self.persist(&next).await?;
        *map = next;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn json_map_store_crud_persists() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_map_store_{}.json", uuid::Uuid::new_v4()));
        let store = JsonMapStore::<i32, String>::new(&tmp).await?;

        // initially empty
        assert!(store.values().await.is_empty());
        assert_eq!(store.last_key().await, None);

        store
            .update_map(|m| {
                m.insert(2, "b".to_string());
                m.insert(1, "a".to_string());
                Ok(())
            })
            .await?;
        assert_eq!(store.values().await, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.last_key().await, Some(2));

        store
            .update_map(|m| {
                if let Some(v) = m.get_mut(&1) { *v = "aa".into(); }
                Ok(())
            })
            .await?;
        assert_eq!(store.get(&1).await.as_deref(), Some("aa"));

        // remove and reload persistence
        assert!(store.remove(&2).await?);
        assert!(!store.remove(&2).await?);
        let reloaded = JsonMapStore::<i32, String>::new(&tmp).await?;
        assert_eq!(reloaded.values().await, vec!["aa".to_string()]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_write_leaves_memory_unchanged() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_map_store_{}.json", uuid::Uuid::new_v4()));
        let store = JsonMapStore::<i32, String>::new(&tmp).await?;
        store.update_map(|m| Ok(m.insert(1, "a".to_string()))).await?;

        // a directory at the file path makes every write fail
        tokio::fs::remove_file(&tmp).await?;
        tokio::fs::create_dir(&tmp).await?;

        let res = store.update_map(|m| Ok(m.insert(2, "b".to_string()))).await;
        assert!(matches!(res, Err(ServiceError::Db(_))));
        let res = store.remove(&1).await;
        assert!(matches!(res, Err(ServiceError::Db(_))));
        assert_eq!(store.values().await, vec!["a".to_string()]);

        let _ = tokio::fs::remove_dir(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_closure_leaves_memory_unchanged() {
        let store = JsonMapStore::<i32, String>::in_memory();
        let res: Result<(), ServiceError> = store
            .update_map(|m| {
                m.insert(1, "a".to_string());
                Err(ServiceError::Db("rejected".into()))
            })
            .await;
        assert!(res.is_err());
        assert!(store.values().await.is_empty());
    }
}
