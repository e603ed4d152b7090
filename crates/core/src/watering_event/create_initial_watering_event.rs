use super::find_water_need;
use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use plant_scheduler_domain::{
    next_scheduled_date, Plant, PlantSpecies, WateringAction, WateringEvent, ID,
};
use plant_scheduler_infra::SchedulerContext;

/// Schedules the first watering of a plant that has, or just got, a species
#[derive(Debug)]
pub struct CreateInitialWateringEventUseCase {
    pub plant: Plant,
    /// Looked up through the plant when not given
    pub species: Option<PlantSpecies>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingSpecies(ID),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingSpecies(plant_id) => Self::MissingSpecies(format!(
                "The plant with id: {}, has no species with a water need.",
                plant_id
            )),
            UseCaseError::StorageError => Self::Internal("Unable to store watering event".into()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateInitialWateringEventUseCase {
    type Response = WateringEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateInitialWateringEvent";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let need = match &self.species {
            Some(species) => Some(species.water_preference),
            None => find_water_need(&self.plant, ctx).await,
        }
        .ok_or_else(|| UseCaseError::MissingSpecies(self.plant.id.clone()))?;

        let base = self.plant.acquisition_date.unwrap_or_else(|| ctx.sys.today());
        let event = WateringEvent::new_pending(
            self.plant.id.clone(),
            next_scheduled_date(base, need, WateringAction::Watered),
            ctx.sys.get_timestamp_millis(),
        );

        ctx.repos
            .watering_events
            .insert(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(event)
    }
}
