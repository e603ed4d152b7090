use super::find_water_need;
use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use plant_scheduler_domain::{next_scheduled_date, WateringAction, WateringEvent, ID};
use plant_scheduler_infra::SchedulerContext;
use tracing::info;

/// Rebuilds the pending schedule of a plant after its species changed.
///
/// Every pending event of the plant is discarded. If the plant still has a
/// species, one new pending event is counted from the last real watering,
/// falling back to the acquisition date and then today.
#[derive(Debug)]
pub struct RecalculateWateringEventsUseCase {
    pub plant_id: ID,
}

#[derive(Debug)]
pub struct RecalculatedSchedule {
    pub deleted_count: i64,
    /// `None` when the plant has no species to schedule against
    pub next_event: Option<WateringEvent>,
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
            UseCaseError::StorageError => {
                Self::Internal("Unable to recalculate watering events".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RecalculateWateringEventsUseCase {
    type Response = RecalculatedSchedule;

    type Error = UseCaseError;

    const NAME: &'static str = "RecalculateWateringEvents";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let plant = ctx
            .repos
            .plants
            .find(&self.plant_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.plant_id.clone()))?;

        let deleted_count = ctx
            .repos
            .watering_events
            .delete_pending_by_plant(&plant.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .deleted_count;

        let need = match find_water_need(&plant, ctx).await {
            Some(need) => need,
            None => {
                info!(
                    "Plant: {} has no species, cleared {} pending watering events",
                    plant.id, deleted_count
                );
                return Ok(RecalculatedSchedule {
                    deleted_count,
                    next_event: None,
                });
            }
        };

        let last_watered = ctx
            .repos
            .watering_events
            .find_last_watered_by_plant(&plant.id)
            .await
            .and_then(|e| e.completed_date);
        let base = last_watered
            .or(plant.acquisition_date)
            .unwrap_or_else(|| ctx.sys.today());

        let event = WateringEvent::new_pending(
            plant.id.clone(),
            next_scheduled_date(base, need, WateringAction::Watered),
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos
            .watering_events
            .insert(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(RecalculatedSchedule {
            deleted_count,
            next_event: Some(event),
        })
    }
}
