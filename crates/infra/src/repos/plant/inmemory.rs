use super::IPlantRepo;
use crate::repos::shared::inmemory_repo::*;
use plant_scheduler_domain::{Plant, ID};

pub struct InMemoryPlantRepo {
    plants: std::sync::Mutex<Vec<Plant>>,
}

impl InMemoryPlantRepo {
    pub fn new() -> Self {
        Self {
            plants: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Used by the other inmemory repos to join on plant ownership
    pub(crate) fn plant_ids_of_user(&self, user_id: &ID) -> Vec<ID> {
        find_by(&self.plants, |p| p.user_id == *user_id)
            .into_iter()
            .map(|p| p.id)
            .collect()
    }
}

impl Default for InMemoryPlantRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IPlantRepo for InMemoryPlantRepo {
    async fn insert(&self, plant: &Plant) -> anyhow::Result<()> {
        insert(plant, &self.plants);
        Ok(())
    }

    async fn save(&self, plant: &Plant) -> anyhow::Result<()> {
        save(plant, &self.plants);
        Ok(())
    }

    async fn find(&self, plant_id: &ID) -> Option<Plant> {
        find(plant_id, &self.plants)
    }

    async fn find_by_user_and_id(&self, user_id: &ID, plant_id: &ID) -> Option<Plant> {
        find(plant_id, &self.plants).filter(|p| p.user_id == *user_id)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Plant>> {
        let mut plants = find_by(&self.plants, |p| p.user_id == *user_id);
        plants.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(plants)
    }

    async fn delete(&self, plant_id: &ID) -> Option<Plant> {
        delete(plant_id, &self.plants)
    }
}
