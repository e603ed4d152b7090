use crate::error::SchedulerError;
use crate::plant::{CreatePlantUseCase, GetPlantsUseCase};
use crate::shared::usecase::execute;
use crate::watering_event::ImportWateringEventUseCase;
use chrono::NaiveDate;
use plant_scheduler_domain::{Plant, WateringEvent, WateringEventStatus, ID};
use plant_scheduler_infra::SchedulerContext;

/// Plant attributes carried from the device to the server
#[derive(Debug, Clone)]
pub struct MigratedPlant {
    pub name: String,
    pub location: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub photos: Vec<String>,
    pub species_id: Option<ID>,
}

impl From<&Plant> for MigratedPlant {
    fn from(plant: &Plant) -> Self {
        Self {
            name: plant.name.clone(),
            location: plant.location.clone(),
            acquisition_date: plant.acquisition_date,
            notes: plant.notes.clone(),
            photos: plant.photos.clone(),
            species_id: plant.species_id.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MigratedWateringEvent {
    /// The plant id on the server
    pub plant_id: ID,
    pub scheduled_date: NaiveDate,
    pub status: WateringEventStatus,
    pub completed_date: Option<NaiveDate>,
}

/// The server operations guest data is migrated through
#[async_trait::async_trait(?Send)]
pub trait IServerGateway {
    async fn create_plant(&self, user_id: &ID, plant: MigratedPlant)
        -> Result<Plant, SchedulerError>;
    async fn create_watering_event(
        &self,
        user_id: &ID,
        event: MigratedWateringEvent,
    ) -> Result<WateringEvent, SchedulerError>;
    async fn list_plant_ids(&self, user_id: &ID) -> Result<Vec<ID>, SchedulerError>;
}

/// Runs the plant and watering event use cases against a server context
pub struct ContextServerGateway {
    ctx: SchedulerContext,
}

impl ContextServerGateway {
    pub fn new(ctx: SchedulerContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait(?Send)]
impl IServerGateway for ContextServerGateway {
    async fn create_plant(
        &self,
        user_id: &ID,
        plant: MigratedPlant,
    ) -> Result<Plant, SchedulerError> {
        let usecase = CreatePlantUseCase {
            user_id: user_id.clone(),
            name: plant.name,
            location: plant.location,
            acquisition_date: plant.acquisition_date,
            notes: plant.notes,
            photos: plant.photos,
            species_id: plant.species_id,
            schedule_initial_event: false,
        };
        execute(usecase, &self.ctx)
            .await
            .map(|created| created.plant)
            .map_err(SchedulerError::from)
    }

    async fn create_watering_event(
        &self,
        user_id: &ID,
        event: MigratedWateringEvent,
    ) -> Result<WateringEvent, SchedulerError> {
        let usecase = ImportWateringEventUseCase {
            plant_id: event.plant_id,
            user_id: user_id.clone(),
            scheduled_date: event.scheduled_date,
            status: event.status,
            completed_date: event.completed_date,
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(SchedulerError::from)
    }

    async fn list_plant_ids(&self, user_id: &ID) -> Result<Vec<ID>, SchedulerError> {
        let usecase = GetPlantsUseCase {
            user_id: user_id.clone(),
        };
        execute(usecase, &self.ctx)
            .await
            .map(|plants| plants.into_iter().map(|p| p.id).collect())
            .map_err(SchedulerError::from)
    }
}
