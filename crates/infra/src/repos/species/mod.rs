mod inmemory;
mod local;
mod postgres;

pub use inmemory::InMemoryPlantSpeciesRepo;
pub use local::LocalPlantSpeciesRepo;
pub use postgres::PostgresPlantSpeciesRepo;

use plant_scheduler_domain::{PlantSpecies, ID};

#[async_trait::async_trait]
pub trait IPlantSpeciesRepo: Send + Sync {
    async fn insert(&self, species: &PlantSpecies) -> anyhow::Result<()>;
    async fn find(&self, species_id: &ID) -> Option<PlantSpecies>;
}
