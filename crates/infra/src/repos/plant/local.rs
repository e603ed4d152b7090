use super::IPlantRepo;
use crate::local_storage::{keys, LocalStorage};
use plant_scheduler_domain::{Plant, ID};
use tracing::error;

/// Plants stored on the device. There is only one user on a device,
/// so the user filters of `IPlantRepo` are ignored.
pub struct LocalPlantRepo {
    storage: LocalStorage,
}

impl LocalPlantRepo {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    async fn read_all(&self) -> anyhow::Result<Vec<Plant>> {
        self.storage.read_array(keys::GUEST_PLANTS).await
    }
}

#[async_trait::async_trait]
impl IPlantRepo for LocalPlantRepo {
    async fn insert(&self, plant: &Plant) -> anyhow::Result<()> {
        self.storage
            .update_array(keys::GUEST_PLANTS, |plants: &mut Vec<Plant>| {
                plants.push(plant.clone())
            })
            .await
    }

    async fn save(&self, plant: &Plant) -> anyhow::Result<()> {
        self.storage
            .update_array(keys::GUEST_PLANTS, |plants: &mut Vec<Plant>| {
                for p in plants.iter_mut() {
                    if p.id == plant.id {
                        *p = plant.clone();
                    }
                }
            })
            .await
    }

    async fn find(&self, plant_id: &ID) -> Option<Plant> {
        match self.read_all().await {
            Ok(plants) => plants.into_iter().find(|p| p.id == *plant_id),
            Err(e) => {
                error!("Unable to read local plants. Error: {:?}", e);
                None
            }
        }
    }

    async fn find_by_user_and_id(&self, _user_id: &ID, plant_id: &ID) -> Option<Plant> {
        self.find(plant_id).await
    }

    async fn find_by_user(&self, _user_id: &ID) -> anyhow::Result<Vec<Plant>> {
        let mut plants = self.read_all().await?;
        plants.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(plants)
    }

    async fn delete(&self, plant_id: &ID) -> Option<Plant> {
        let res = self
            .storage
            .update_array(keys::GUEST_PLANTS, |plants: &mut Vec<Plant>| {
                let index = plants.iter().position(|p| p.id == *plant_id)?;
                Some(plants.remove(index))
            })
            .await;
        match res {
            Ok(deleted) => deleted,
            Err(e) => {
                error!("Unable to delete local plant: {}. Error: {:?}", plant_id, e);
                None
            }
        }
    }
}
