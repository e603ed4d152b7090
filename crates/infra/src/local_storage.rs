use crate::repos::IKeyValueStore;
use plant_scheduler_domain::ID;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::error;

/// Keys used for the guest data kept on the device
pub mod keys {
    pub const IS_GUEST_MODE: &str = "@plantscheduler:is_guest_mode";
    pub const GUEST_OWNER_ID: &str = "@plantscheduler:guest_owner_id";
    pub const GUEST_PLANTS: &str = "@plantscheduler:guest_plants";
    pub const GUEST_WATER_EVENTS: &str = "@plantscheduler:guest_water_events";
    pub const SPECIES_CACHE: &str = "@plantscheduler:species_cache";
}

/// Typed access to the on-device key value store.
///
/// Every collection is one serialized JSON array under one key. Reads load
/// the whole array and writes replace the whole array. There is a single
/// implicit user and no protection against concurrent writers, callers
/// must not run two mutations at the same time.
#[derive(Clone)]
pub struct LocalStorage {
    kv: Arc<dyn IKeyValueStore>,
}

impl LocalStorage {
    pub fn new(kv: Arc<dyn IKeyValueStore>) -> Self {
        Self { kv }
    }

    pub async fn read_array<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Vec<T>> {
        match self.kv.get(key).await? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn write_array<T: Serialize>(&self, key: &str, items: &[T]) -> anyhow::Result<()> {
        let data = serde_json::to_string(items)?;
        self.kv.set(key, &data).await
    }

    /// Read the full array, apply `update` and write the full array back
    pub async fn update_array<T, R, F>(&self, key: &str, update: F) -> anyhow::Result<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let mut items = self.read_array::<T>(key).await?;
        let res = update(&mut items);
        self.write_array(key, &items).await?;
        Ok(res)
    }

    pub async fn is_guest_mode(&self) -> bool {
        match self.kv.get(keys::IS_GUEST_MODE).await {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                error!("Error checking guest mode: {:?}", e);
                false
            }
        }
    }

    pub async fn set_guest_mode(&self, is_guest: bool) -> anyhow::Result<()> {
        let value = if is_guest { "true" } else { "false" };
        self.kv.set(keys::IS_GUEST_MODE, value).await
    }

    /// The implicit owner of everything stored on this device.
    /// Generated and persisted on first use.
    pub async fn guest_owner_id(&self) -> anyhow::Result<ID> {
        if let Some(id) = self.kv.get(keys::GUEST_OWNER_ID).await? {
            if let Ok(id) = id.parse::<ID>() {
                return Ok(id);
            }
            error!("Stored guest owner id: {} is malformed, replacing it", id);
        }
        let id = ID::new();
        self.kv.set(keys::GUEST_OWNER_ID, &id.as_string()).await?;
        Ok(id)
    }

    pub async fn has_local_guest_data(&self) -> bool {
        let plants = self.read_array::<serde_json::Value>(keys::GUEST_PLANTS).await;
        let events = self
            .read_array::<serde_json::Value>(keys::GUEST_WATER_EVENTS)
            .await;
        match (plants, events) {
            (Ok(plants), Ok(events)) => !plants.is_empty() || !events.is_empty(),
            (plants, events) => {
                error!(
                    "Error checking guest data. Plants: {:?}, events: {:?}",
                    plants.err(),
                    events.err()
                );
                false
            }
        }
    }

    /// Remove all guest data, typically after it was migrated to the server.
    /// The species cache is kept as it is not user data.
    pub async fn clear_guest_data(&self) -> anyhow::Result<()> {
        for key in &[
            keys::IS_GUEST_MODE,
            keys::GUEST_OWNER_ID,
            keys::GUEST_PLANTS,
            keys::GUEST_WATER_EVENTS,
        ] {
            self.kv.remove(key).await?;
        }
        Ok(())
    }
}
