use super::IPlantSpeciesRepo;
use crate::repos::shared::inmemory_repo::*;
use plant_scheduler_domain::{PlantSpecies, ID};

pub struct InMemoryPlantSpeciesRepo {
    species: std::sync::Mutex<Vec<PlantSpecies>>,
}

impl InMemoryPlantSpeciesRepo {
    pub fn new() -> Self {
        Self {
            species: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPlantSpeciesRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IPlantSpeciesRepo for InMemoryPlantSpeciesRepo {
    async fn insert(&self, species: &PlantSpecies) -> anyhow::Result<()> {
        insert(species, &self.species);
        Ok(())
    }

    async fn find(&self, species_id: &ID) -> Option<PlantSpecies> {
        find(species_id, &self.species)
    }
}
