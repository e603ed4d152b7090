use super::IPlantSpeciesRepo;
use crate::local_storage::{keys, LocalStorage};
use plant_scheduler_domain::{PlantSpecies, ID};
use tracing::error;

/// Species catalogue cached on the device
pub struct LocalPlantSpeciesRepo {
    storage: LocalStorage,
}

impl LocalPlantSpeciesRepo {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }
}

#[async_trait::async_trait]
impl IPlantSpeciesRepo for LocalPlantSpeciesRepo {
    async fn insert(&self, species: &PlantSpecies) -> anyhow::Result<()> {
        self.storage
            .update_array(keys::SPECIES_CACHE, |cache: &mut Vec<PlantSpecies>| {
                cache.retain(|s| s.id != species.id);
                cache.push(species.clone());
            })
            .await
    }

    async fn find(&self, species_id: &ID) -> Option<PlantSpecies> {
        match self
            .storage
            .read_array::<PlantSpecies>(keys::SPECIES_CACHE)
            .await
        {
            Ok(cache) => cache.into_iter().find(|s| s.id == *species_id),
            Err(e) => {
                error!("Unable to read the species cache. Error: {:?}", e);
                None
            }
        }
    }
}
