mod file;
mod inmemory;

pub use file::FileKeyValueStore;
pub use inmemory::InMemoryKeyValueStore;

/// Device-resident string storage. Values are whole documents,
/// there is no partial update of a key.
#[async_trait::async_trait]
pub trait IKeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_stores(dir: &TempDir) -> Vec<Arc<dyn IKeyValueStore>> {
        vec![
            Arc::new(InMemoryKeyValueStore::new()),
            Arc::new(FileKeyValueStore::new(dir.path().join("kv"))),
        ]
    }

    #[tokio::test]
    async fn test_kv_queries() {
        let dir = TempDir::new().unwrap();

        for store in create_stores(&dir) {
            assert!(store.get("@plantscheduler:missing").await.unwrap().is_none());

            store.set("@plantscheduler:a", "1").await.unwrap();
            store.set("@plantscheduler:b", "2").await.unwrap();
            assert_eq!(
                store.get("@plantscheduler:a").await.unwrap(),
                Some("1".to_string())
            );

            // Overwrites the whole value
            store.set("@plantscheduler:a", "3").await.unwrap();
            assert_eq!(
                store.get("@plantscheduler:a").await.unwrap(),
                Some("3".to_string())
            );

            store.remove("@plantscheduler:a").await.unwrap();
            assert!(store.get("@plantscheduler:a").await.unwrap().is_none());
            assert_eq!(
                store.get("@plantscheduler:b").await.unwrap(),
                Some("2".to_string())
            );

            // Removing a missing key is not an error
            assert!(store.remove("@plantscheduler:a").await.is_ok());
        }
    }

    #[tokio::test]
    async fn file_store_survives_reopening() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kv");

        let store = FileKeyValueStore::new(path.clone());
        store.set("@plantscheduler:guest_plants", "[]").await.unwrap();

        let reopened = FileKeyValueStore::new(path);
        assert_eq!(
            reopened.get("@plantscheduler:guest_plants").await.unwrap(),
            Some("[]".to_string())
        );
    }
}
