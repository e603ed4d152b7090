mod kv;
mod plant;
mod shared;
mod species;
mod watering_event;

use crate::local_storage::LocalStorage;
pub use kv::{FileKeyValueStore, IKeyValueStore, InMemoryKeyValueStore};
pub use plant::{IPlantRepo, InMemoryPlantRepo, LocalPlantRepo, PostgresPlantRepo};
pub use shared::repo::DeleteResult;
pub use species::{
    IPlantSpeciesRepo, InMemoryPlantSpeciesRepo, LocalPlantSpeciesRepo, PostgresPlantSpeciesRepo,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
pub use watering_event::{
    IWateringEventRepo, InMemoryWateringEventRepo, LocalWateringEventRepo,
    PostgresWateringEventRepo,
};

#[derive(Clone)]
pub struct Repos {
    pub watering_events: Arc<dyn IWateringEventRepo>,
    pub plants: Arc<dyn IPlantRepo>,
    pub species: Arc<dyn IPlantSpeciesRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            watering_events: Arc::new(PostgresWateringEventRepo::new(pool.clone())),
            plants: Arc::new(PostgresPlantRepo::new(pool.clone())),
            species: Arc::new(PostgresPlantSpeciesRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        let plants = Arc::new(InMemoryPlantRepo::new());
        Self {
            watering_events: Arc::new(InMemoryWateringEventRepo::new(plants.clone())),
            plants,
            species: Arc::new(InMemoryPlantSpeciesRepo::new()),
        }
    }

    pub fn create_local(storage: LocalStorage) -> Self {
        Self {
            watering_events: Arc::new(LocalWateringEventRepo::new(storage.clone())),
            plants: Arc::new(LocalPlantRepo::new(storage.clone())),
            species: Arc::new(LocalPlantSpeciesRepo::new(storage)),
        }
    }
}
