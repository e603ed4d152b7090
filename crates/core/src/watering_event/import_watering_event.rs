use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use chrono::NaiveDate;
use plant_scheduler_domain::{WateringEvent, WateringEventStatus, ID};
use plant_scheduler_infra::SchedulerContext;

/// Stores an event as it was recorded elsewhere, keeping its status and
/// completion date. Used when guest data is moved to the server.
#[derive(Debug)]
pub struct ImportWateringEventUseCase {
    pub plant_id: ID,
    pub user_id: ID,
    pub scheduled_date: NaiveDate,
    pub status: WateringEventStatus,
    pub completed_date: Option<NaiveDate>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InconsistentCompletion(WateringEventStatus),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(plant_id) => Self::NotFound(format!(
                "The plant with id: {}, was not found.",
                plant_id
            )),
            UseCaseError::InconsistentCompletion(status) => Self::Validation(format!(
                "A watering event with status: {}, must have a completed date if and only if it is resolved.",
                status.as_str()
            )),
            UseCaseError::StorageError => Self::Internal("Unable to store watering event".into()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ImportWateringEventUseCase {
    type Response = WateringEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "ImportWateringEvent";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        if self.status.is_terminal() != self.completed_date.is_some() {
            return Err(UseCaseError::InconsistentCompletion(self.status));
        }

        let plant = ctx
            .repos
            .plants
            .find_by_user_and_id(&self.user_id, &self.plant_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.plant_id.clone()))?;

        let timestamp = ctx.sys.get_timestamp_millis();
        let event = WateringEvent {
            id: Default::default(),
            plant_id: plant.id,
            scheduled_date: self.scheduled_date,
            status: self.status,
            completed_date: self.completed_date,
            created: timestamp,
            updated: timestamp,
        };
        ctx.repos
            .watering_events
            .insert(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(event)
    }
}
