use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use plant_scheduler_domain::{Plant, ID};
use plant_scheduler_infra::SchedulerContext;

/// Deletes a plant together with all of its watering events
#[derive(Debug)]
pub struct DeletePlantUseCase {
    pub user_id: ID,
    pub plant_id: ID,
}

#[derive(Debug)]
pub struct DeletedPlant {
    pub plant: Plant,
    pub deleted_events: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(plant_id) => Self::NotFound(format!(
                "The plant with id: {}, was not found.",
                plant_id
            )),
            UseCaseError::StorageError => Self::Internal("Unable to delete plant".into()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeletePlantUseCase {
    type Response = DeletedPlant;

    type Error = UseCaseError;

    const NAME: &'static str = "DeletePlant";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let plant = ctx
            .repos
            .plants
            .find_by_user_and_id(&self.user_id, &self.plant_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.plant_id.clone()))?;

        let deleted_events = ctx
            .repos
            .watering_events
            .delete_by_plant(&plant.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .deleted_count;

        let plant = ctx
            .repos
            .plants
            .delete(&plant.id)
            .await
            .ok_or(UseCaseError::StorageError)?;

        Ok(DeletedPlant {
            plant,
            deleted_events,
        })
    }
}
