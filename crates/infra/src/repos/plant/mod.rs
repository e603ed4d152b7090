mod inmemory;
mod local;
mod postgres;

pub use inmemory::InMemoryPlantRepo;
pub use local::LocalPlantRepo;
pub use postgres::PostgresPlantRepo;

use plant_scheduler_domain::{Plant, ID};

#[async_trait::async_trait]
pub trait IPlantRepo: Send + Sync {
    async fn insert(&self, plant: &Plant) -> anyhow::Result<()>;
    async fn save(&self, plant: &Plant) -> anyhow::Result<()>;
    async fn find(&self, plant_id: &ID) -> Option<Plant>;
    /// Only finds the `Plant` if it belongs to the given user
    async fn find_by_user_and_id(&self, user_id: &ID, plant_id: &ID) -> Option<Plant>;
    /// Newest first
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Plant>>;
    async fn delete(&self, plant_id: &ID) -> Option<Plant>;
}
