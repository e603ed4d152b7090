use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use chrono::NaiveDate;
use plant_scheduler_domain::{parse_date, WateringEvent, ID};
use plant_scheduler_infra::SchedulerContext;

/// Manually schedules a watering at the given date. The species is not
/// consulted and no other event is created.
#[derive(Debug)]
pub struct CreateWateringEventUseCase {
    pub plant_id: ID,
    pub user_id: ID,
    pub scheduled_date: NaiveDate,
}

impl CreateWateringEventUseCase {
    pub fn parse(plant_id: ID, user_id: ID, scheduled_date: &str) -> Result<Self, SchedulerError> {
        Ok(Self {
            plant_id,
            user_id,
            scheduled_date: parse_date(scheduled_date)?,
        })
    }
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
            UseCaseError::StorageError => Self::Internal("Unable to store watering event".into()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateWateringEventUseCase {
    type Response = WateringEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateWateringEvent";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let plant = ctx
            .repos
            .plants
            .find_by_user_and_id(&self.user_id, &self.plant_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.plant_id.clone()))?;

        let event = WateringEvent::new_pending(
            plant.id,
            self.scheduled_date,
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
